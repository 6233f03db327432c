use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::Parser;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
✂️ seedcut version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   derive the read-length cutoff needed for a target genome coverage";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// estimated number of bases in the (haploid) genome. accepts a plain
    /// integer or a `k`/`M`/`G` suffix:
    ///     4600000
    ///     4600k
    ///     4.6M
    #[arg(
        value_parser = |x: &str| GenomeSize::try_from(x),
        verbatim_doc_comment
    )]
    pub genome_size: GenomeSize,

    /// file with the captured output of `DBstats -b1 -u`, or `-` for stdin
    #[arg(default_value = "-")]
    pub stats: String,

    /// desired coverage ratio (i.e. over-sampling) of the genome
    #[arg(long, default_value_t = 20.0)]
    pub coverage: f64,

    /// write the cutoff to a file instead of standard output
    #[arg(short)]
    pub output: Option<String>,
}

/// A genome size in bases, resolved from the command line.
#[derive(Copy, Clone, Debug)]
pub struct GenomeSize(pub u64);

impl std::fmt::Display for GenomeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a genome size string.
#[derive(Debug)]
pub struct ParseGenomeSizeErr(String);

impl std::fmt::Display for ParseGenomeSizeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid genome size: {}", self.0)
    }
}

impl std::error::Error for ParseGenomeSizeErr {}

impl<'a> TryFrom<&'a str> for GenomeSize {
    type Error = ParseGenomeSizeErr;

    fn try_from(arg: &'a str) -> Result<GenomeSize, Self::Error> {
        let arg = arg.trim();

        let (mantissa, multiplier) = match arg.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => {
                let multiplier = match c.to_ascii_lowercase() {
                    'k' => 1e3,
                    'm' => 1e6,
                    'g' => 1e9,
                    _ => {
                        return Err(ParseGenomeSizeErr(format!(
                            "unknown suffix '{c}' (should be one of `k`, `M` or `G`)"
                        )))
                    }
                };
                (&arg[..arg.len() - c.len_utf8()], multiplier)
            }
            _ => (arg, 1.0),
        };

        // A fractional mantissa only makes sense together with a suffix.
        let bases = if multiplier == 1.0 {
            match mantissa.parse::<u64>() {
                Ok(v) => v as f64,
                Err(_) => {
                    return Err(ParseGenomeSizeErr(indoc::formatdoc! {"
                    expected a positive base count, got '{arg}'. The expected format is \
                    an integer with an optional `k`/`M`/`G` suffix, as in:
                      4600000
                      4600k
                      4.6M
                    "}))
                }
            }
        } else {
            let v = mantissa.parse::<f64>().map_err(|_| {
                ParseGenomeSizeErr(format!(
                    "invalid number '{mantissa}' ahead of the '{}' suffix",
                    arg.chars().last().unwrap_or_default()
                ))
            })?;
            v * multiplier
        };

        if !(bases >= 1.0 && bases <= u64::MAX as f64) {
            return Err(ParseGenomeSizeErr(format!(
                "'{arg}' does not resolve to a positive base count"
            )));
        }

        Ok(GenomeSize(bases.round() as u64))
    }
}
