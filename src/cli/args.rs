use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "maildraft")]
#[command(about = "Template-driven business email drafting with AI")]
#[command(version)]
pub struct Args {
    /// Provider name from the config file
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an email in one shot and print it
    Generate(GenerateArgs),
    /// Interactive compose mode
    Compose,
    /// List email templates and their fields
    Templates,
    /// List supported translation languages
    Languages,
    /// Search the recipient directory
    Recipients {
        /// Matches name, email, position, role or department
        query: Option<String>,
    },
    /// List configured providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Show or edit the sender profile (interactive without options)
    Profile(ProfileArgs),
    /// Show or customize closing remarks
    Remarks {
        /// Template id (all templates are listed when omitted)
        template: Option<String>,

        /// New closing remark
        text: Option<String>,

        /// Restore the built-in closing remark
        #[arg(long, conflicts_with = "text")]
        reset: bool,
    },
    /// Choose the default provider and model
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Template id (see 'maildraft templates')
    #[arg(short = 't', long, required_unless_present_any = ["describe", "describe_file"])]
    pub template: Option<String>,

    /// Form field as name=value, e.g. startDate=2024-01-01 (repeatable)
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE", requires = "template")]
    pub fields: Vec<String>,

    /// Describe the email in your own words instead of using a template
    #[arg(short = 'd', long, conflicts_with_all = ["template", "describe_file"])]
    pub describe: Option<String>,

    /// Read the description from a file ('-' for stdin)
    #[arg(long, value_name = "PATH", conflicts_with = "template")]
    pub describe_file: Option<PathBuf>,

    /// Recipient id or unique search term (repeatable)
    #[arg(long = "to", value_name = "RECIPIENT", required = true)]
    pub to: Vec<String>,

    /// Translate the generated email into this language
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Print the body as plain text instead of HTML
    #[arg(long)]
    pub plain: bool,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub position: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Sentence every body ends with, e.g. "감사합니다."
    #[arg(long)]
    pub closing: Option<String>,

    /// Print the saved profile
    #[arg(long, conflicts_with_all = ["name", "department", "position", "email", "closing"])]
    pub show: bool,
}

impl ProfileArgs {
    pub const fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.department.is_some()
            || self.position.is_some()
            || self.email.is_some()
            || self.closing.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let args = Args::try_parse_from([
            "maildraft",
            "generate",
            "-t",
            "annual_leave",
            "-f",
            "startDate=2024-01-01",
            "--field",
            "reason=가족 여행",
            "--to",
            "1",
            "--to",
            "을지문덕",
            "--lang",
            "en",
        ])
        .unwrap();

        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.template.as_deref(), Some("annual_leave"));
        assert_eq!(generate.fields, vec!["startDate=2024-01-01", "reason=가족 여행"]);
        assert_eq!(generate.to, vec!["1", "을지문덕"]);
        assert_eq!(generate.lang.as_deref(), Some("en"));
    }

    #[test]
    fn test_generate_requires_recipient() {
        let result = Args::try_parse_from(["maildraft", "generate", "-t", "dispatch"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_requires_template_or_description() {
        let result = Args::try_parse_from(["maildraft", "generate", "--to", "1"]);
        assert!(result.is_err());

        let args =
            Args::try_parse_from(["maildraft", "generate", "-d", "회의실 예약", "--to", "1"]).unwrap();
        assert!(matches!(args.command, Command::Generate(g) if g.template.is_none()));
    }

    #[test]
    fn test_template_and_description_conflict() {
        let result = Args::try_parse_from([
            "maildraft", "generate", "-t", "dispatch", "-d", "x", "--to", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from(["maildraft", "compose", "--provider", "ollama", "-v"]).unwrap();
        assert_eq!(args.provider.as_deref(), Some("ollama"));
        assert!(args.verbose);
    }

    #[test]
    fn test_profile_updates() {
        let args = Args::try_parse_from(["maildraft", "profile", "--name", "김철수"]).unwrap();
        let Command::Profile(profile) = args.command else {
            panic!("expected profile");
        };
        assert!(profile.has_updates());
        assert!(!ProfileArgs::default().has_updates());
    }

    #[test]
    fn test_remarks_reset_conflicts_with_text() {
        let result =
            Args::try_parse_from(["maildraft", "remarks", "dispatch", "새 맺음말", "--reset"]);
        assert!(result.is_err());
    }
}
