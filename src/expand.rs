use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of the values a mapping token may reference.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn current_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
    }

    fn current_dir(&self) -> Option<PathBuf> {
        env::current_dir().ok()
    }
}

/// Expand a mapping token against `environment`.
///
/// Supported forms:
/// - `~/rest` and `~`: relative to the home directory
/// - `$NAME/rest`: the variable runs up to the first `/`; unset means empty
/// - `.rest` / `./rest`: relative to the working directory
/// - anything else verbatim
///
/// The result is canonicalized when it exists. Otherwise a relative result is
/// joined onto the working directory and an absolute one is returned as-is.
pub fn expand_in(token: &str, environment: &impl Environment) -> PathBuf {
    let substituted = substitute(token, environment);
    let path = Path::new(substituted.trim());

    let candidate = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match environment.current_dir() {
            Some(cwd) => cwd.join(path),
            None => path.to_path_buf(),
        }
    };

    fs::canonicalize(&candidate).unwrap_or(candidate)
}

fn substitute(token: &str, environment: &impl Environment) -> String {
    if token == "~" {
        return home_string(environment);
    }

    if let Some(rest) = token.strip_prefix("~/") {
        return format!("{}/{}", home_string(environment), rest);
    }

    if let Some(var_and_rest) = token.strip_prefix('$') {
        let (name, rest) = match var_and_rest.find('/') {
            Some(idx) => var_and_rest.split_at(idx),
            None => (var_and_rest, ""),
        };
        let value = environment.var(name).unwrap_or_default();
        return format!("{}{}", value, rest);
    }

    if token.starts_with('.') && !token.starts_with("..") {
        let rest = &token[1..];
        return rest.strip_prefix('/').unwrap_or(rest).to_string();
    }

    token.to_string()
}

fn home_string(environment: &impl Environment) -> String {
    environment
        .home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Map-backed environment for tests.
    #[derive(Debug, Default)]
    pub(crate) struct FakeEnv {
        pub vars: HashMap<String, String>,
        pub home: Option<PathBuf>,
        pub cwd: Option<PathBuf>,
    }

    impl Environment for FakeEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn current_dir(&self) -> Option<PathBuf> {
            self.cwd.clone()
        }
    }

    fn fake(home: &str, cwd: &str) -> FakeEnv {
        FakeEnv {
            vars: HashMap::new(),
            home: Some(PathBuf::from(home)),
            cwd: Some(PathBuf::from(cwd)),
        }
    }

    #[test]
    fn test_tilde_prefix() {
        let env = fake("/nonexistent-home/u", "/work");
        assert_eq!(
            expand_in("~/dotfiles/bashrc", &env),
            PathBuf::from("/nonexistent-home/u/dotfiles/bashrc")
        );
    }

    #[test]
    fn test_bare_tilde() {
        let env = fake("/nonexistent-home/u", "/work");
        assert_eq!(expand_in("~", &env), PathBuf::from("/nonexistent-home/u"));
    }

    #[test]
    fn test_env_var_with_remainder() {
        let mut env = fake("/h", "/work");
        env.vars
            .insert("XDG_CONFIG_HOME".to_string(), "/nonexistent-cfg".to_string());
        assert_eq!(
            expand_in("$XDG_CONFIG_HOME/nvim", &env),
            PathBuf::from("/nonexistent-cfg/nvim")
        );
    }

    #[test]
    fn test_env_var_alone() {
        let mut env = fake("/h", "/work");
        env.vars.insert("DEST".to_string(), "/nonexistent-dest".to_string());
        assert_eq!(expand_in("$DEST", &env), PathBuf::from("/nonexistent-dest"));
    }

    #[test]
    fn test_unset_env_var_is_empty() {
        let env = fake("/h", "/nonexistent-work");
        // "$MISSING/x" becomes "/x", which is absolute
        assert_eq!(expand_in("$MISSING/x-neostow", &env), PathBuf::from("/x-neostow"));
    }

    #[test]
    fn test_leading_dot_is_local_relative() {
        let env = fake("/h", "/nonexistent-work");
        assert_eq!(
            expand_in("./dotfiles/vimrc", &env),
            PathBuf::from("/nonexistent-work/dotfiles/vimrc")
        );
        assert_eq!(
            expand_in(".bashrc", &env),
            PathBuf::from("/nonexistent-work/bashrc")
        );
    }

    #[test]
    fn test_double_dot_is_verbatim() {
        let env = fake("/h", "/nonexistent-work/sub");
        assert_eq!(
            expand_in("../other", &env),
            PathBuf::from("/nonexistent-work/sub/../other")
        );
    }

    #[test]
    fn test_relative_is_joined_onto_cwd() {
        let env = fake("/h", "/nonexistent-work");
        assert_eq!(
            expand_in("config/app", &env),
            PathBuf::from("/nonexistent-work/config/app")
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let env = fake("/h", "/w");
        assert_eq!(
            expand_in("/nonexistent-abs/file  ", &env),
            PathBuf::from("/nonexistent-abs/file")
        );
    }

    #[test]
    fn test_existing_path_is_canonicalized() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("alias")).unwrap();

        let env = FakeEnv {
            cwd: Some(temp.path().to_path_buf()),
            ..FakeEnv::default()
        };
        let expected = fs::canonicalize(&real).unwrap();
        assert_eq!(expand_in("alias", &env), expected);
        assert_eq!(expand_in("./alias/../real", &env), expected);
    }
}
