use aeon_avatar::{
    app::Application,
    config::AppConfig,
    telemetry::{build_telemetry, register_telemetry},
};
use clap::Parser;
use std::sync::LazyLock;

static TELEMETRY: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let telemetry = build_telemetry(subscriber_name, default_filter_level, std::io::stdout);
        register_telemetry(telemetry);
    } else {
        let null_telemetry = build_telemetry(subscriber_name, default_filter_level, std::io::sink);
        register_telemetry(null_telemetry);
    };
});

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_avatar(&self, seed: &str, query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/avatars/{}?{}", &self.address, seed, query))
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn get_grid(&self, seed: &str, query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/avatars/{}/grid?{}", &self.address, seed, query))
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn post_batch<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/avatars", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request")
    }
}

/// Config for a test instance, batch limit lowered so it is cheap to exceed.
pub fn test_config() -> AppConfig {
    AppConfig::parse_from([
        "aeon-avatar",
        "--stage",
        "dev",
        "--app-application-host",
        "127.0.0.1",
        // Use a random OS port
        "--app-application-port",
        "0",
        "--avatar-default-size",
        "50",
        "--avatar-cache-max-age",
        "600",
        "--avatar-batch-limit",
        "8",
    ])
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TELEMETRY);

    let app = Application::build(test_config()).await.unwrap();

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let test_app = TestApp {
        address: format!("http://127.0.0.1:{}", &app.port),
        port: app.port,
        api_client,
    };

    _ = tokio::spawn(app.run_until_stopped());

    test_app
}
