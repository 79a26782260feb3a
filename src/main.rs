use snafu::{ResultExt, Snafu};
use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use baudot::ita::alphabet;
use baudot::tape::Holes;
use baudot::{Alphabet, Decoder, Encoder, Word};

#[derive(StructOpt)]
#[structopt(name = "baudot", about = "Converts between unicode and Baudot/ITA telegraph code")]
pub struct Cli {
    /// Log shifts and skipped input
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
    /// Suppress all logging
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Decodes words to unicode
    Decode(Options),
    /// Encodes unicode to words
    Encode(Options),
}

#[derive(StructOpt)]
struct Options {
    /// Baudot alphabet: ITA1, ITA2 or US-TTY
    #[structopt(short = "a", long = "alphabet", default_value = "ITA2", parse(try_from_str = alphabet::lookup))]
    alphabet: &'static Alphabet,
    /// Word format: raw (one byte per word), hex, or tape (encode only)
    #[structopt(short = "f", long = "format", default_value = "raw", possible_values = &["raw", "hex", "tape"])]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Format {
    Raw,
    Hex,
    Tape,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Format::Raw),
            "hex" => Ok(Format::Hex),
            "tape" => Ok(Format::Tape),
            _ => Err(format!("Invalid format: {}", s)),
        }
    }
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{}: {}", context, source))]
    IoError { context: &'static str, source: io::Error },
    #[snafu(display("Invalid hex input: {}", source))]
    HexError { source: hex::FromHexError },
    #[snafu(display("The {:?} format cannot be decoded", format))]
    UnsupportedFormat { format: Format },
}

fn write_words(format: Format, words: &[Word], output: &mut dyn Write) -> io::Result<()> {
    match format {
        Format::Raw => output.write_all(words),
        Format::Hex => output.write_all(hex::encode(words).as_bytes()),
        Format::Tape => {
            for &word in words {
                writeln!(output, "{}", Holes::from_word(word).render())?;
            }
            Ok(())
        }
    }
}

fn encode_stream(
    encoder: &mut Encoder,
    format: Format,
    mut input: impl BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let mut line = String::new();
    let mut words = Vec::new();
    loop {
        line.clear();
        let len = input
            .read_line(&mut line)
            .context(IoError { context: "Failed to read input" })?;
        if len == 0 {
            break;
        }
        words.clear();
        encoder.encode_into(&line, &mut words);
        write_words(format, &words, &mut *output).context(IoError { context: "Failed to write output" })?;
    }
    if format == Format::Hex {
        writeln!(output).context(IoError { context: "Failed to write output" })?;
    }
    output.flush().context(IoError { context: "Failed to write output" })
}

fn decode_stream(
    decoder: &mut Decoder,
    format: Format,
    mut input: impl BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let mut text = String::new();
    match format {
        Format::Raw => {
            let mut buf = [0u8; 4096];
            loop {
                let len = match input.read(&mut buf) {
                    Ok(len) => len,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err).context(IoError { context: "Failed to read input" }),
                };
                if len == 0 {
                    break;
                }
                text.clear();
                decoder.decode_into(buf[..len].iter().copied(), &mut text);
                output
                    .write_all(text.as_bytes())
                    .context(IoError { context: "Failed to write output" })?;
            }
        }
        Format::Hex => {
            let mut line = Vec::new();
            // Hex digits not yet paired up; a word may straddle a line break.
            let mut digits: Vec<u8> = Vec::new();
            loop {
                line.clear();
                let len = input
                    .read_until(b'\n', &mut line)
                    .context(IoError { context: "Failed to read input" })?;
                if len == 0 {
                    break;
                }
                digits.extend(line.iter().copied().filter(|b| !b.is_ascii_whitespace()));
                let even = digits.len() - digits.len() % 2;
                let words = hex::decode(&digits[..even]).context(HexError)?;
                digits.drain(..even);

                text.clear();
                decoder.decode_into(words, &mut text);
                output
                    .write_all(text.as_bytes())
                    .context(IoError { context: "Failed to write output" })?;
            }
            if !digits.is_empty() {
                return Err(CliError::HexError {
                    source: hex::FromHexError::OddLength,
                });
            }
        }
        Format::Tape => return Err(CliError::UnsupportedFormat { format }),
    }
    output.flush().context(IoError { context: "Failed to write output" })
}

fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::from_args();
    init_tracing(cli.quiet, cli.verbose);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let input = stdin.lock();
    let mut output = stdout.lock();

    match cli.command {
        Command::Encode(options) => {
            let mut encoder = Encoder::new(options.alphabet);
            tracing::debug!(alphabet = encoder.alphabet().name(), format = ?options.format, "encoding");
            encode_stream(&mut encoder, options.format, input, &mut output)?;
        }
        Command::Decode(options) => {
            let mut decoder = Decoder::new(options.alphabet);
            tracing::debug!(alphabet = decoder.alphabet().name(), format = ?options.format, "decoding");
            decode_stream(&mut decoder, options.format, input, &mut output)?;
        }
    }
    Ok(())
}
