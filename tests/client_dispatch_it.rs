// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use algo_speaker_client::{
	_preludet::*,
	auth::SharedSecret,
	client::{SpeakerClient, StrobeCommand},
	http::ReqwestTransport,
};

#[tokio::test]
async fn accepted_commands_pass_the_body_through() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/controls/strobe/start").body(
				"{\"pattern\":3,\"color1\":\"amber\",\"color2\":\"amber\",\"ledlvl\":\"50\"}",
			);
			then.status(200).body("Strobe running");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url(), "algo");
	let command =
		StrobeCommand::default().with_pattern(3).with_colors("amber", "amber").with_led_level("50");
	let outcome = client.start_strobe(&command).await.expect("Strobe dispatch should succeed.");

	assert!(outcome.success);
	assert_eq!(outcome.status, Some(200));
	assert_eq!(outcome.body, "Strobe running");

	mock.assert_async().await;
}

#[tokio::test]
async fn rejected_commands_report_failure_with_the_device_reply() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/settings/device.info");
			then.status(404).body("Not Found");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url(), "algo");
	let outcome = client.device_info().await.expect("Dispatch should succeed.");

	assert!(!outcome.success);
	assert_eq!(outcome.status, Some(404));
	assert_eq!(outcome.body, "Not Found");

	mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_devices_reduce_to_failed_outcomes() {
	// Port 9 (discard) is closed on loopback, so the connection is refused.
	let client = build_reqwest_test_client("http://127.0.0.1:9", "algo");
	let outcome = client.stop_tone().await.expect("Dispatch should still produce an outcome.");

	assert!(!outcome.success);
	assert_eq!(outcome.status, None);
	assert!(outcome.body.contains("Network error occurred while calling the device."));
	assert!(!outcome.body.contains("hmac "), "Signing material must not leak into failures.");
}

#[tokio::test]
async fn slow_devices_hit_the_transport_timeout() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/controls/tone/stop");
			then.status(200).body("Stopped").delay(Duration::from_millis(500));
		})
		.await;
	let transport =
		ReqwestTransport::new().with_timeout(Some(Duration::from_millis(50)));
	let client = SpeakerClient::with_transport(
		&server.base_url(),
		SharedSecret::new("algo").expect("Secret fixture should be valid."),
		transport,
	)
	.expect("Client should build against the mock device URL.");
	let outcome = client.stop_tone().await.expect("Dispatch should still produce an outcome.");

	assert!(!outcome.success);
	assert_eq!(outcome.status, None);
}

#[tokio::test]
async fn set_page_volume_issues_a_put_with_the_dotted_key() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/settings/audio.page.vol")
				.header("Content-Type", "application/json")
				.body("{\"audio.page.vol\":4}");
			then.status(200).body("OK");
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url(), "algo");
	let outcome = client.set_page_volume(4).await.expect("Volume dispatch should succeed.");

	assert!(outcome.success);

	mock.assert_async().await;
}
