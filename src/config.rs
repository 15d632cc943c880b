#[derive(clap::Parser, Debug, Clone)]
pub struct AppConfig {
    #[clap(long, env)]
    pub stage: Stage,

    // App configs
    #[clap(long, env)]
    pub app_application_port: u16,

    #[clap(long, env)]
    pub app_application_host: String,

    // Avatar configs
    /// Pixel side length used when a request does not ask for one
    #[clap(long, env, default_value_t = 200)]
    pub avatar_default_size: u32,

    /// Seconds clients may cache a rendered avatar
    #[clap(long, env, default_value_t = 86_400)]
    pub avatar_cache_max_age: u64,

    /// Most seeds accepted by one batch request
    #[clap(long, env, default_value_t = 64)]
    pub avatar_batch_limit: usize,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab_case")]
pub enum Stage {
    Dev,
    Prod,
}

impl Stage {
    /// Default log level when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self {
            Stage::Dev => "debug",
            Stage::Prod => "info",
        }
    }
}
