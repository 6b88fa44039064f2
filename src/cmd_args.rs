use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Required. Connection profile to use for the trip backend.
    /// Default is 'default'. If the profile is not configured, startup
    /// fails.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Log debug messages.
    #[clap(
        short = 'v',
        long,
        help = "Log verbose messages",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            profile: args.profile,
            verbose: args.verbose,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            profile: args.profile,
            verbose: args.verbose,
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
