use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub site_root: PathBuf,
    pub posts_dir: PathBuf,
    pub projects_dir: PathBuf,
    pub bio_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            site_root: PathBuf::from("."),
            posts_dir: PathBuf::from("content/posts"),
            projects_dir: PathBuf::from("content/projects"),
            bio_file: PathBuf::from("content/bio/bio.mdx"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Defaults {
    pub post_extensions: Vec<String>,
    pub project_extensions: Vec<String>,
    pub excerpt_length: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            post_extensions: vec!["mdx".to_string()],
            project_extensions: vec!["mdx".to_string(), "md".to_string()],
            excerpt_length: 160,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Publications {
    /// Tried in order, the first existing file wins
    pub candidates: Vec<String>,
    pub bibtex_input: String,
    pub bibtex_output: String,
    pub orcid_output: String,
}

impl Default for Publications {
    fn default() -> Self {
        Publications {
            candidates: vec![
                "data/publications-from-bib.json".to_string(),
                "data/publications.json".to_string(),
            ],
            bibtex_input: "data/publications.bib".to_string(),
            bibtex_output: "data/publications-from-bib.json".to_string(),
            orcid_output: "data/publications.json".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Orcid {
    pub id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub publications: Publications,
    pub orcid: Option<Orcid>,
    pub log: Option<Log>,
}

impl Config {
    /// Resolves a path relative to the site root. Absolute paths are kept.
    pub fn site_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.site_root.join(path)
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.site_path(&self.paths.posts_dir)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.site_path(&self.paths.projects_dir)
    }

    pub fn bio_file(&self) -> PathBuf {
        self.site_path(&self.paths.bio_file)
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        site_root: parse_path(cfg.paths.site_root),
        posts_dir: parse_path(cfg.paths.posts_dir),
        projects_dir: parse_path(cfg.paths.projects_dir),
        bio_file: parse_path(cfg.paths.bio_file),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

pub const CFG_FILE_NAME: &str = "folio.toml";

/// Looks for `folio.toml` next to the executable, in the current directory,
/// then in the user configuration directory.
pub fn find_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir().map(|d| d.join("folio"))];

    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Reads the configuration from `cfg_path`, or from the first file [`find_config_path`] finds.
/// Without any file the defaults apply. Returns the file that was read, if any.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<(Config, Option<PathBuf>)> {
    match cfg_path.or_else(find_config_path) {
        Some(path) => Ok((read_config(&path)?, Some(path))),
        None => Ok((Config::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_explicit_missing_config() {
        let res = open_config(Some(PathBuf::from("res/test/no-such-folio.toml")));
        assert_eq!(res.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_open_explicit_config() {
        let (cfg, path) = open_config(Some(PathBuf::from("res/test/folio.toml"))).unwrap();
        assert_eq!(path, Some(PathBuf::from("res/test/folio.toml")));
        assert_eq!(cfg.posts_dir(), PathBuf::from("res/test/content/posts"));
        assert_eq!(cfg.orcid.unwrap().id, "0000-0002-1825-0097");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.posts_dir(), PathBuf::from("./content/posts"));
        assert_eq!(cfg.defaults.post_extensions, ["mdx"]);
        assert_eq!(cfg.defaults.project_extensions, ["mdx", "md"]);
        assert_eq!(cfg.publications.candidates[0], "data/publications-from-bib.json");
        assert!(cfg.orcid.is_none());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[paths]
site_root = "/srv/site"
posts_dir = "writing"

[defaults]
excerpt_length = 80

[publications]
candidates = ["data/only.json"]

[orcid]
id = "0000-0002-1825-0097"

[log]
level = "Debug"
log_to_console = false
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.posts_dir(), PathBuf::from("/srv/site/writing"));
        assert_eq!(cfg.projects_dir(), PathBuf::from("/srv/site/content/projects"));
        assert_eq!(cfg.defaults.excerpt_length, 80);
        assert_eq!(cfg.defaults.post_extensions, ["mdx"]);
        assert_eq!(cfg.publications.candidates, ["data/only.json"]);
        assert_eq!(cfg.orcid.unwrap().id, "0000-0002-1825-0097");
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(!log.log_to_console);
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[paths\nposts_dir = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_exe_dir_expansion() {
        let path = parse_path(PathBuf::from("${exe_dir}/log/folio.log"));
        assert!(!path.to_string_lossy().contains("${exe_dir}"));
        assert!(path.ends_with("log/folio.log"));
    }
}
