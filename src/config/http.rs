use std::{
	fmt,
	net::{IpAddr, Ipv4Addr, SocketAddr},
};

use serde::{Deserialize, Deserializer, de};
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HttpConfig
{
	/// The IP address the server should listen on.
	#[serde(default = "default_ip")]
	pub ip: IpAddr,

	/// The port the server should listen on.
	#[serde(default = "default_port")]
	pub port: u16,

	/// Origins the map page is served from. Browsers on these origins are
	/// allowed to call the API cross-origin.
	#[serde(default = "default_allowed_origins", deserialize_with = "deserialize_allowed_origins")]
	pub allowed_origins: Box<[http::HeaderValue]>,

	/// Whether to record request and response headers in traces.
	pub include_http_headers: bool,
}

impl HttpConfig
{
	pub fn socket_addr(&self) -> SocketAddr
	{
		SocketAddr::new(self.ip, self.port)
	}

	pub fn allowed_origins(&self) -> impl Iterator<Item = http::HeaderValue>
	{
		self.allowed_origins.iter().cloned()
	}
}

impl Default for HttpConfig
{
	fn default() -> Self
	{
		Self {
			ip: default_ip(),
			port: default_port(),
			allowed_origins: default_allowed_origins(),
			include_http_headers: false,
		}
	}
}

fn default_ip() -> IpAddr
{
	IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16
{
	3000
}

fn default_allowed_origins() -> Box<[http::HeaderValue]>
{
	Box::from([http::HeaderValue::from_static("http://localhost:3000")])
}

fn deserialize_allowed_origins<'de, D>(
	deserializer: D,
) -> Result<Box<[http::HeaderValue]>, D::Error>
where
	D: Deserializer<'de>,
{
	struct HeaderListVisitor;

	impl<'de> de::Visitor<'de> for HeaderListVisitor
	{
		type Value = Box<[http::HeaderValue]>;

		fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
		{
			fmt.write_str("a list of CORS origins")
		}

		fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
		where
			A: de::SeqAccess<'de>,
		{
			let size_hint = seq.size_hint().unwrap_or_default();
			let mut header_values = Vec::with_capacity(size_hint);

			while let Some(origin) = seq.next_element::<Url>()? {
				let origin = origin.origin();

				if !origin.is_tuple() {
					return Err(de::Error::custom("CORS origins cannot be opaque"));
				}

				// `Url` always serializes with a trailing slash, but browsers send
				// origins without one.
				let origin = origin.ascii_serialization();

				match http::HeaderValue::from_str(&origin) {
					Ok(header_value) => header_values.push(header_value),
					Err(err) => {
						return Err(de::Error::custom(format_args!("invalid CORS origin: {err}")));
					},
				}
			}

			Ok(header_values.into_boxed_slice())
		}
	}

	deserializer.deserialize_seq(HeaderListVisitor)
}
