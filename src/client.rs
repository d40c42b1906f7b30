//! Speaker control client built on the request signer.
//!
//! [`SpeakerClient`] wraps the device endpoints the firmware exposes (tone and
//! strobe controls, settings reads/writes) behind one dispatch path: sign the
//! request, hand the header set and body to the transport, and reduce delivery
//! to a [`CommandOutcome`]. Signing faults surface as hard errors; delivery
//! faults (including non-200 replies) are reported outcomes, so callers can
//! always tell a misconfigured secret apart from an unreachable device.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{HttpMethod, Principal, SharedSecret},
	error::{ConfigError, ResponseError, SignError, TransportError},
	http::{OutboundRequest, SpeakerTransport, TransportReply},
	obs::{self, CommandKind, CommandSpan, DispatchOutcome},
	signer::{RequestSigner, RequestUri, SigningRequest},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

const TONE_START_URI: &str = "/api/controls/tone/start";
const TONE_STOP_URI: &str = "/api/controls/tone/stop";
const STROBE_START_URI: &str = "/api/controls/strobe/start";
const STROBE_STOP_URI: &str = "/api/controls/strobe/stop";
const DEVICE_INFO_URI: &str = "/api/settings/device.info";
const PAGE_VOLUME_URI: &str = "/api/settings/audio.page.vol";

/// Typed client for one speaker, generic over the HTTP transport.
#[derive(Clone, Debug)]
pub struct SpeakerClient<T> {
	base: Url,
	signer: RequestSigner,
	transport: T,
}
#[cfg(feature = "reqwest")]
impl SpeakerClient<ReqwestTransport> {
	/// Connects to a device host (`192.168.1.100` or `192.168.1.100:8080`) with
	/// the default reqwest transport. Bare hosts get an `http://` scheme, which
	/// is what stock firmware serves.
	pub fn connect(host: &str, secret: SharedSecret) -> Result<Self, ConfigError> {
		Self::with_transport(host, secret, ReqwestTransport::new())
	}
}
impl<T> SpeakerClient<T>
where
	T: SpeakerTransport,
{
	/// Builds a client around an explicit transport implementation.
	pub fn with_transport(
		host: &str,
		secret: SharedSecret,
		transport: T,
	) -> Result<Self, ConfigError> {
		let base = device_base(host)?;

		Ok(Self { base, signer: RequestSigner::new(secret), transport })
	}

	/// Overrides the principal embedded in `Authorization` values.
	pub fn with_principal(mut self, principal: Principal) -> Self {
		self.signer = self.signer.with_principal(principal);

		self
	}

	/// Returns the device base URL.
	pub fn base_url(&self) -> &Url {
		&self.base
	}

	/// Plays a tone or announcement file on the speaker.
	///
	/// `volume` is passed through to the firmware untouched and only included
	/// in the body when supplied.
	pub async fn play_tone(
		&self,
		path: &str,
		loop_playback: bool,
		volume: Option<u32>,
	) -> Result<CommandOutcome> {
		let payload = TonePayload { path, r#loop: loop_playback, volume };

		self.dispatch(
			CommandKind::Tone,
			"play_tone",
			HttpMethod::Post,
			TONE_START_URI,
			Some(&payload),
		)
		.await
	}

	/// Stops the current tone or announcement.
	pub async fn stop_tone(&self) -> Result<CommandOutcome> {
		self.dispatch::<()>(CommandKind::Tone, "stop_tone", HttpMethod::Post, TONE_STOP_URI, None)
			.await
	}

	/// Starts the strobe light on models that carry one.
	pub async fn start_strobe(&self, command: &StrobeCommand) -> Result<CommandOutcome> {
		self.dispatch(
			CommandKind::Strobe,
			"start_strobe",
			HttpMethod::Post,
			STROBE_START_URI,
			Some(command),
		)
		.await
	}

	/// Stops the strobe light.
	pub async fn stop_strobe(&self) -> Result<CommandOutcome> {
		self.dispatch::<()>(
			CommandKind::Strobe,
			"stop_strobe",
			HttpMethod::Post,
			STROBE_STOP_URI,
			None,
		)
		.await
	}

	/// Reads device information and status (`device.info`).
	pub async fn device_info(&self) -> Result<CommandOutcome> {
		self.dispatch::<()>(
			CommandKind::Settings,
			"device_info",
			HttpMethod::Get,
			DEVICE_INFO_URI,
			None,
		)
		.await
	}

	/// Reads the current page volume setting.
	pub async fn page_volume(&self) -> Result<CommandOutcome> {
		self.dispatch::<()>(
			CommandKind::Settings,
			"page_volume",
			HttpMethod::Get,
			PAGE_VOLUME_URI,
			None,
		)
		.await
	}

	/// Persistently sets the page volume (`PUT`, survives reboots).
	pub async fn set_page_volume(&self, volume: u32) -> Result<CommandOutcome> {
		let payload = VolumePayload { volume };

		self.dispatch(
			CommandKind::Settings,
			"set_page_volume",
			HttpMethod::Put,
			PAGE_VOLUME_URI,
			Some(&payload),
		)
		.await
	}

	async fn dispatch<P>(
		&self,
		kind: CommandKind,
		stage: &'static str,
		method: HttpMethod,
		uri: &str,
		payload: Option<&P>,
	) -> Result<CommandOutcome>
	where
		P: Serialize,
	{
		let span = CommandSpan::new(kind, stage);

		obs::record_dispatch_outcome(kind, DispatchOutcome::Attempt);

		let result = span
			.instrument(async move {
				let uri = RequestUri::new(uri).map_err(SignError::from)?;
				let url = self.base.join(uri.as_str()).map_err(|source| {
					ConfigError::InvalidRequestUrl { uri: uri.to_string(), source }
				})?;
				let mut signing = SigningRequest::new(method, uri);

				if let Some(payload) = payload {
					signing = signing.with_payload(payload)?;
				}

				let signed = self.signer.sign(&signing)?;
				let outbound = OutboundRequest {
					method,
					url,
					headers: signed.headers(),
					body: signed.body,
				};

				match self.transport.execute(outbound).await {
					Ok(reply) => Ok(CommandOutcome::from_reply(reply)),
					Err(error) => Ok(CommandOutcome::from_transport_failure(&error)),
				}
			})
			.await;

		match &result {
			Ok(outcome) if outcome.success =>
				obs::record_dispatch_outcome(kind, DispatchOutcome::Success),
			_ => obs::record_dispatch_outcome(kind, DispatchOutcome::Failure),
		}

		result
	}
}

/// Delivery result of one command.
///
/// `success` is true exactly when the device answered 200. Transport failures
/// reduce to `success = false` with the failure chain as [`body`](Self::body)
/// and no status; signing failures never reach this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutcome {
	/// Whether the device accepted the command.
	pub success: bool,
	/// HTTP status of the reply, absent when delivery itself failed.
	pub status: Option<u16>,
	/// Reply body passed through unchanged, or the transport failure message.
	pub body: String,
}
impl CommandOutcome {
	fn from_reply(reply: TransportReply) -> Self {
		Self { success: reply.status == 200, status: Some(reply.status), body: reply.body }
	}

	fn from_transport_failure(error: &TransportError) -> Self {
		let mut body = error.to_string();
		let mut cause = StdError::source(error);

		while let Some(inner) = cause {
			body.push_str(&format!(" {inner}."));

			cause = inner.source();
		}

		Self { success: false, status: None, body }
	}

	/// Parses the reply body as JSON, e.g. for `device.info` documents.
	pub fn json<D>(&self) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_str(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ResponseError::Parse { source, status: self.status }.into())
	}
}

/// Strobe pattern command for models with a built-in LED.
///
/// Pattern numbers, color names, and LED levels are firmware-defined values
/// passed through unchanged; the defaults mirror the stock alert pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StrobeCommand {
	pattern: u8,
	color1: String,
	color2: String,
	ledlvl: String,
}
impl Default for StrobeCommand {
	fn default() -> Self {
		Self { pattern: 1, color1: "red".into(), color2: "blue".into(), ledlvl: "100".into() }
	}
}
impl StrobeCommand {
	/// Overrides the firmware pattern number.
	pub fn with_pattern(mut self, pattern: u8) -> Self {
		self.pattern = pattern;

		self
	}

	/// Overrides the alternating color pair.
	pub fn with_colors(mut self, color1: impl Into<String>, color2: impl Into<String>) -> Self {
		self.color1 = color1.into();
		self.color2 = color2.into();

		self
	}

	/// Overrides the LED brightness level.
	pub fn with_led_level(mut self, ledlvl: impl Into<String>) -> Self {
		self.ledlvl = ledlvl.into();

		self
	}
}

#[derive(Serialize)]
struct TonePayload<'a> {
	path: &'a str,
	r#loop: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	volume: Option<u32>,
}

#[derive(Serialize)]
struct VolumePayload {
	#[serde(rename = "audio.page.vol")]
	volume: u32,
}

fn device_base(host: &str) -> Result<Url, ConfigError> {
	let raw = if host.contains("://") { host.to_owned() } else { format!("http://{host}") };

	Url::parse(&raw).map_err(|source| ConfigError::InvalidHost { host: host.to_owned(), source })
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::http::TransportFuture;

	struct StubTransport {
		seen: Mutex<Vec<OutboundRequest>>,
		reply: Result<TransportReply, ()>,
	}
	impl StubTransport {
		fn replying(status: u16, body: &str) -> Arc<Self> {
			Arc::new(Self {
				seen: Mutex::new(Vec::new()),
				reply: Ok(TransportReply { status, body: body.into() }),
			})
		}

		fn failing() -> Arc<Self> {
			Arc::new(Self { seen: Mutex::new(Vec::new()), reply: Err(()) })
		}

		fn requests(&self) -> Vec<OutboundRequest> {
			self.seen.lock().expect("Stub transport lock should not be poisoned.").clone()
		}
	}
	impl SpeakerTransport for Arc<StubTransport> {
		fn execute(&self, request: OutboundRequest) -> TransportFuture<'_> {
			self.seen.lock().expect("Stub transport lock should not be poisoned.").push(request);

			let reply = self.reply.clone().map_err(|()| {
				TransportError::Io(std::io::Error::other("stubbed connection failure"))
			});

			Box::pin(async move { reply })
		}
	}

	fn client_with(transport: &Arc<StubTransport>) -> SpeakerClient<Arc<StubTransport>> {
		SpeakerClient::with_transport(
			"192.168.1.100",
			SharedSecret::new("algo").expect("Secret fixture should be valid."),
			transport.clone(),
		)
		.expect("Client fixture should build.")
	}

	#[tokio::test]
	async fn play_tone_sends_the_digested_body() {
		let transport = StubTransport::replying(200, "Success");
		let outcome = client_with(&transport)
			.play_tone("page-notif.wav", false, None)
			.await
			.expect("Tone dispatch should succeed.");

		assert!(outcome.success);
		assert_eq!(outcome.status, Some(200));
		assert_eq!(outcome.body, "Success");

		let requests = transport.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, HttpMethod::Post);
		assert_eq!(requests[0].url.as_str(), "http://192.168.1.100/api/controls/tone/start");
		assert_eq!(
			requests[0].body.as_deref(),
			Some("{\"path\":\"page-notif.wav\",\"loop\":false}"),
		);
		assert_eq!(
			requests[0].headers.content_md5.as_deref(),
			Some("af71f480653187e74bb34edc0c737357"),
		);
	}

	#[tokio::test]
	async fn volume_is_included_only_when_supplied() {
		let transport = StubTransport::replying(200, "Success");

		client_with(&transport)
			.play_tone("test.wav", false, Some(50))
			.await
			.expect("Dispatch should succeed.");

		let requests = transport.requests();

		assert_eq!(
			requests[0].body.as_deref(),
			Some("{\"path\":\"test.wav\",\"loop\":false,\"volume\":50}"),
		);
	}

	#[tokio::test]
	async fn body_less_commands_omit_content_headers() {
		let transport = StubTransport::replying(200, "Stopped");

		client_with(&transport).stop_tone().await.expect("Dispatch should succeed.");

		let requests = transport.requests();

		assert!(requests[0].body.is_none());
		assert!(requests[0].headers.content_type.is_none());
		assert!(requests[0].headers.content_md5.is_none());
		assert!(requests[0].headers.authorization.starts_with("hmac admin:"));
	}

	#[tokio::test]
	async fn set_page_volume_uses_the_dotted_setting_key() {
		let transport = StubTransport::replying(200, "OK");

		client_with(&transport).set_page_volume(4).await.expect("Dispatch should succeed.");

		let requests = transport.requests();

		assert_eq!(requests[0].method, HttpMethod::Put);
		assert_eq!(requests[0].body.as_deref(), Some("{\"audio.page.vol\":4}"));
	}

	#[tokio::test]
	async fn strobe_defaults_mirror_the_stock_pattern() {
		let transport = StubTransport::replying(200, "OK");

		client_with(&transport)
			.start_strobe(&StrobeCommand::default())
			.await
			.expect("Dispatch should succeed.");

		let requests = transport.requests();

		assert_eq!(
			requests[0].body.as_deref(),
			Some("{\"pattern\":1,\"color1\":\"red\",\"color2\":\"blue\",\"ledlvl\":\"100\"}"),
		);
	}

	#[tokio::test]
	async fn non_200_replies_reduce_to_failed_outcomes() {
		let transport = StubTransport::replying(404, "Not Found");
		let outcome =
			client_with(&transport).device_info().await.expect("Dispatch should succeed.");

		assert!(!outcome.success);
		assert_eq!(outcome.status, Some(404));
		assert_eq!(outcome.body, "Not Found");
	}

	#[tokio::test]
	async fn transport_failures_reduce_to_messages() {
		let transport = StubTransport::failing();
		let outcome =
			client_with(&transport).stop_strobe().await.expect("Dispatch should succeed.");

		assert!(!outcome.success);
		assert_eq!(outcome.status, None);
		assert!(outcome.body.contains("stubbed connection failure"));
		assert!(!outcome.body.contains("hmac "), "Signing material must not leak into failures.");
	}

	#[tokio::test]
	async fn reply_bodies_parse_as_json() {
		let transport = StubTransport::replying(
			200,
			"{\"device.model\":\"8180\",\"device.version\":\"3.3.0\"}",
		);
		let outcome =
			client_with(&transport).device_info().await.expect("Dispatch should succeed.");
		let document: serde_json::Value = outcome.json().expect("Reply should parse as JSON.");

		assert_eq!(document["device.model"], "8180");

		let malformed = StubTransport::replying(200, "Not JSON");
		let outcome =
			client_with(&malformed).device_info().await.expect("Dispatch should succeed.");

		assert!(outcome.json::<serde_json::Value>().is_err());
	}

	#[test]
	fn bare_hosts_gain_a_scheme() {
		let base = device_base("192.168.1.100").expect("Bare host should parse.");

		assert_eq!(base.as_str(), "http://192.168.1.100/");
		assert!(device_base("http://example.com").is_ok());
		assert!(device_base("not a host").is_err());
	}
}
