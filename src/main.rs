use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use fetchcurl::config::{apply_header_rules, load_config};
use fetchcurl::request::{parse_descriptor, parse_header_arg, read_descriptor};
use fetchcurl::{HeaderSource, Headers, Request, RequestBody};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fetchcurl",
    version,
    about = "Turn fetch-style request descriptions into curl commands",
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON request description ("-" reads stdin)
    #[arg(value_name = "REQUEST")]
    request: Option<PathBuf>,

    /// Request URL, overriding the description
    #[arg(short, long)]
    url: Option<String>,

    /// HTTP method, overriding the description
    #[arg(short = 'X', long)]
    method: Option<String>,

    /// Extra header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Request body text, replacing the description's body
    #[arg(short, long)]
    data: Option<String>,

    /// Directory or file containing fetchcurl.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Select a profile from fetchcurl.json
    #[arg(short = 'P', long, conflicts_with = "no_config")]
    profile: Option<String>,

    /// Ignore fetchcurl.json
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Write the command to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;

    let command = build_command(&cli, &base_dir, std::io::stdin().lock())?;

    if let Some(out) = &cli.out {
        let out = resolve_relative(&base_dir, out);
        std::fs::write(&out, format!("{command}\n"))
            .with_context(|| format!("writing command to {}", out.display()))?;
        eprintln!("Command written to {}", out.display());
    } else {
        println!("{command}");
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FETCHCURL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_command(cli: &Cli, base_dir: &Path, stdin: impl Read) -> Result<String> {
    let mut request = load_request(cli, base_dir, stdin)?;

    if let Some(url) = &cli.url {
        request.url = url.clone();
    }
    if let Some(method) = &cli.method {
        request.init.method = Some(method.clone());
    }
    if let Some(data) = &cli.data {
        request.init.body = RequestBody::Text(data.clone());
    }
    for raw in &cli.headers {
        let (name, value) = parse_header_arg(raw)?;
        append_header(&mut request.init.headers, name, value);
    }

    if !cli.no_config {
        let target = cli
            .config
            .as_ref()
            .map(|p| resolve_relative(base_dir, p))
            .unwrap_or_else(|| base_dir.to_path_buf());
        if let Some(loaded) = load_config(&target).context("loading configuration")? {
            debug!(path = %loaded.path.display(), "applying header rules");
            let rules = loaded.config.header_rules(cli.profile.as_deref())?;
            request.init.headers = apply_header_rules(request.init.headers.take(), &rules);
        } else if cli.profile.is_some() {
            bail!("--profile requires a fetchcurl.json config");
        }
    }

    if request.url.is_empty() {
        bail!("Missing request URL");
    }

    Ok(request.to_curl())
}

fn load_request(cli: &Cli, base_dir: &Path, mut stdin: impl Read) -> Result<Request> {
    match &cli.request {
        Some(path) if path.as_os_str() == "-" => {
            read_descriptor(stdin).context("reading request from stdin")
        }
        Some(path) => {
            let path = resolve_relative(base_dir, path);
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("reading request {}", path.display()))?;
            parse_descriptor(&contents)
                .with_context(|| format!("parsing request {}", path.display()))
        }
        None if cli.url.is_some() => Ok(Request::default()),
        None => {
            let mut contents = String::new();
            stdin
                .read_to_string(&mut contents)
                .context("reading request from stdin")?;
            parse_descriptor(&contents).context("parsing request from stdin")
        }
    }
}

fn append_header(headers: &mut Option<HeaderSource>, name: String, value: String) {
    match headers {
        Some(HeaderSource::Headers(list)) => list.append(name, value),
        Some(HeaderSource::Map(map)) => {
            map.insert(name, value);
        }
        None => {
            let mut list = Headers::new();
            list.append(name, value);
            *headers = Some(HeaderSource::Headers(list));
        }
    }
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("fetchcurl").chain(args.iter().copied()))
    }

    #[test]
    fn resolve_relative_joins_when_needed() {
        let base = Path::new("/tmp/base");
        let relative = Path::new("sub/request.json");
        assert_eq!(resolve_relative(base, relative), base.join(relative));

        let absolute = Path::new("/var/data/request.json");
        assert_eq!(resolve_relative(base, absolute), absolute);
    }

    #[test]
    fn builds_from_descriptor_file() -> Result<()> {
        let temp = tempdir()?;
        std::fs::write(
            temp.path().join("req.json"),
            r#"{"url":"https://example.com/a","method":"post","body":{"ok":true}}"#,
        )?;

        let command = build_command(&cli(&["req.json", "--no-config"]), temp.path(), std::io::empty())?;
        assert_eq!(
            command,
            r#"curl 'https://example.com/a' -X POST --data-binary '{"ok":true}'"#
        );
        Ok(())
    }

    #[test]
    fn url_flag_skips_stdin() -> Result<()> {
        let temp = tempdir()?;
        let command = build_command(
            &cli(&["-u", "google.com", "-H", "Accept-Encoding: gzip", "-d", "it's"]),
            temp.path(),
            std::io::empty(),
        )?;
        assert_eq!(
            command,
            r#"curl 'google.com' -H "Accept-Encoding: gzip" --data-binary 'it'\''s' --compressed"#
        );
        Ok(())
    }

    #[test]
    fn reads_descriptor_from_stdin() -> Result<()> {
        let temp = tempdir()?;
        let stdin = r#"{"url":"u","headers":{"Content-Length":"3","X":"1"}}"#.as_bytes();
        let command = build_command(&cli(&[]), temp.path(), stdin)?;
        assert_eq!(command, r#"curl 'u' -H "X: 1""#);
        Ok(())
    }

    #[test]
    fn config_rules_apply_to_headers() -> Result<()> {
        let temp = tempdir()?;
        std::fs::write(
            temp.path().join("fetchcurl.json"),
            r#"{"headers":{"excludeHeaders":["cookie"],"appendHeaders":{"X-Debug":"1"}}}"#,
        )?;

        let command = build_command(
            &cli(&["-u", "u", "-H", "Cookie: a=b", "-H", "Accept: */*"]),
            temp.path(),
            std::io::empty(),
        )?;
        assert_eq!(command, r#"curl 'u' -H "Accept: */*" -H "X-Debug: 1""#);
        Ok(())
    }

    #[test]
    fn missing_url_is_an_error() -> Result<()> {
        let temp = tempdir()?;
        let err = build_command(&cli(&["--no-config"]), temp.path(), r#"{"method":"GET"}"#.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("Missing request URL"));
        Ok(())
    }

    #[test]
    fn profile_without_config_is_an_error() -> Result<()> {
        let temp = tempdir()?;
        let err = build_command(&cli(&["-u", "u", "-P", "ci"]), temp.path(), std::io::empty())
            .unwrap_err();
        assert!(err.to_string().contains("--profile requires"));
        Ok(())
    }

    #[test]
    fn profile_conflicts_with_no_config() {
        let err = Cli::try_parse_from(["fetchcurl", "--no-config", "-P", "ci", "-u", "u"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
