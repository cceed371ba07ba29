use clap::ValueEnum;
use kiln_config::Environment;

/// Build environment selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum EnvArg {
    /// Stable names, source maps, hot reload
    #[value(name = "development", alias = "dev")]
    Development,

    /// Content-hashed names, minification, image compression
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvArg> for Environment {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Development => Environment::Development,
            EnvArg::Production => Environment::Production,
        }
    }
}
