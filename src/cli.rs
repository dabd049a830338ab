use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "punzip")]
#[command(version)]
#[command(about = "A Rust unzip utility with password support", long_about = None)]
#[command(after_help = "Examples:\n  \
  punzip data1.zip                  extract all files from data1.zip\n  \
  punzip -d out secret.zip -P pass  extract an encrypted archive into out/\n  \
  punzip -l archive.zip             list archive contents")]
pub struct Cli {
    /// ZIP file path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List files (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List verbosely with sizes and timestamps
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// Password for encrypted archives
    #[arg(short = 'P', long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }
}
