use anyhow::{Context, Result};
use argh::FromArgs;
use headers::UserAgent;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::Write;
use std::path::{Path, PathBuf};

use github_explorer::github::Github;
use github_explorer::render::Renderer;
use github_explorer::view::RepositoryView;

/// Show a GitHub repository and its open issues as markdown.
#[derive(Debug, FromArgs)]
struct Args {
    /// base URL of the GitHub API [default: $GITHUB_API_URL or https://api.github.com].
    #[argh(option)]
    api_url: Option<String>,
    /// write one markdown file per repository into this directory instead of stdout.
    #[argh(option, short = 'p')]
    path: Option<PathBuf>,
    /// repositories of the form owner/name; each one is loaded in turn.
    #[argh(positional)]
    repositories: Vec<String>,
}

/// `--api-url`, then `$GITHUB_API_URL`, then the public endpoint.
fn api_url(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env)
        .unwrap_or_else(|| Github::API_ENDPOINT.to_string())
}

fn mkdir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).with_context(|| format!("could not create {}", path.display()))
}

fn page_to_filename(path: &Path, view: &RepositoryView) -> PathBuf {
    let name = view
        .repository()
        .map(|repository| repository.full_name.as_str())
        .or_else(|| view.parameter())
        .unwrap_or("repository");
    path.join(format!("{}.md", slug::slugify(name)))
}

fn serialize(path: &Path, page: &str, view: &RepositoryView) -> Result<()> {
    let filename = page_to_filename(path, view);
    let mut f = std::fs::File::create(&filename)
        .with_context(|| format!("could not create {}", filename.display()))?;
    info!("Writing {}", filename.display());
    f.write_all(page.as_bytes())?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("github_explorer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();

    let github = Github::new(
        &api_url(args.api_url.clone(), std::env::var("GITHUB_API_URL").ok()),
        UserAgent::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        )),
    )?;
    let renderer = Renderer::new()?;

    if let Some(path) = &args.path {
        mkdir(path)?;
    }

    let mut view = RepositoryView::new();
    for parameter in &args.repositories {
        view.load(&github, parameter).await;
        let page = renderer.render(&view)?;
        match &args.path {
            Some(path) => serialize(path, &page, &view)?,
            None => {
                let stdout = std::io::stdout();
                let mut stdout = stdout.lock();
                stdout.write_all(page.as_bytes())?;
                stdout.flush()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use github_explorer::view::{Fetched, Response};

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn api_url_flag_wins() {
        assert_eq!(
            api_url(some("http://localhost:1"), some("http://localhost:2")),
            "http://localhost:1"
        );
    }

    #[test]
    fn api_url_falls_back_to_environment() {
        assert_eq!(api_url(None, some("http://localhost:2")), "http://localhost:2");
    }

    #[test]
    fn api_url_defaults_to_public_endpoint() {
        assert_eq!(api_url(None, None), "https://api.github.com");
    }

    #[test]
    fn parses_arguments() {
        let args = Args::from_args(
            &["github-explorer"],
            &["--api-url", "http://localhost:1", "-p", "out", "a/b", "c/d"],
        )
        .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:1"));
        assert_eq!(args.path, Some(PathBuf::from("out")));
        assert_eq!(args.repositories, vec!["a/b", "c/d"]);
    }

    #[test]
    fn filename_falls_back_to_parameter() {
        let mut view = RepositoryView::new();
        view.navigate("Owner/Some.Repo");
        assert_eq!(
            page_to_filename(Path::new("md"), &view),
            Path::new("md").join("owner-some-repo.md")
        );
    }

    #[test]
    fn serialize_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        mkdir(&out).unwrap();
        mkdir(&out).unwrap();

        let mut view = RepositoryView::new();
        let dispatch = view.navigate("a/b");
        view.apply(Response {
            generation: dispatch.generation,
            fetched: Fetched::Issues(Ok(Vec::new())),
        });
        serialize(&out, "# page\n", &view).unwrap();

        let written = std::fs::read_to_string(out.join("a-b.md")).unwrap();
        assert_eq!(written, "# page\n");
    }
}
