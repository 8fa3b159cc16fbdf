//! Git integration layer
//!
//! Wraps a `git2` repository and exposes the two things hooks need from it:
//! read access to the layered git configuration and the hooks directory.

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};

/// First line after the shebang in every hook script we write
pub const HOOK_MARKER: &str = "# Installed by authorguard";

/// Key/value lookups against git configuration
pub trait ConfigSource {
    /// Value of `key`, or an empty string when the key is not set
    fn get(&self, key: &str) -> Result<String>;
}

pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Discover the repository containing the current directory
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").context("No Git repository found")?;
        Ok(GitRepo { repo })
    }

    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;
        let shorthand = head.shorthand().unwrap_or("HEAD");
        Ok(shorthand.to_string())
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Hooks directory, honouring `core.hooksPath`
    pub fn hooks_dir(&self) -> Result<PathBuf> {
        let hooks_path = self.get("core.hooksPath")?;
        if hooks_path.is_empty() {
            return Ok(self.repo.path().join("hooks"));
        }

        let path = PathBuf::from(hooks_path);
        if path.is_absolute() {
            Ok(path)
        } else {
            let base = self.repo.workdir().unwrap_or_else(|| self.repo.path());
            Ok(base.join(path))
        }
    }

    /// Write an executable hook script, refusing to replace a foreign hook unless `force`
    pub fn install_hook(&self, hook_name: &str, hook_content: &str, force: bool) -> Result<PathBuf> {
        let hooks_dir = self.hooks_dir()?;
        let hook_path = hooks_dir.join(hook_name);

        if hook_path.exists() && !force && !self.is_own_hook(hook_name)? {
            anyhow::bail!(
                "Hook '{}' already exists and was not installed by authorguard (use --force to overwrite)",
                hook_path.display()
            );
        }

        std::fs::create_dir_all(&hooks_dir).context("Failed to create hooks directory")?;
        std::fs::write(&hook_path, hook_content)
            .with_context(|| format!("Failed to write hook file: {}", hook_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)
                .context("Failed to set hook file permissions")?;
        }

        tracing::debug!("installed hook {}", hook_path.display());
        Ok(hook_path)
    }

    /// Remove a hook script we installed. Returns false if there was nothing of ours to remove.
    pub fn remove_hook(&self, hook_name: &str) -> Result<bool> {
        if !self.is_own_hook(hook_name)? {
            return Ok(false);
        }

        let hook_path = self.hooks_dir()?.join(hook_name);
        std::fs::remove_file(&hook_path)
            .with_context(|| format!("Failed to remove hook file: {}", hook_path.display()))?;
        Ok(true)
    }

    pub fn hook_exists(&self, hook_name: &str) -> Result<bool> {
        Ok(self.hooks_dir()?.join(hook_name).exists())
    }

    /// Whether the hook file exists and carries our marker
    pub fn is_own_hook(&self, hook_name: &str) -> Result<bool> {
        let hook_path = self.hooks_dir()?.join(hook_name);
        if !hook_path.exists() {
            return Ok(false);
        }

        let content = std::fs::read(&hook_path)
            .with_context(|| format!("Failed to read hook file: {}", hook_path.display()))?;
        Ok(String::from_utf8_lossy(&content)
            .lines()
            .any(|line| line.trim() == HOOK_MARKER))
    }
}

impl ConfigSource for GitRepo {
    fn get(&self, key: &str) -> Result<String> {
        let mut config = self.repo.config().context("Failed to open git config")?;
        let snapshot = config.snapshot().context("Failed to snapshot git config")?;

        match snapshot.get_string(key) {
            Ok(value) => Ok(value),
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!("git config '{}' is not set", key);
                Ok(String::new())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read git config '{key}'")),
        }
    }
}

/// Shell script dropped into the hooks directory
pub fn hook_script(hook_name: &str) -> String {
    format!("#!/bin/sh\n{HOOK_MARKER}\nexec authorguard run {hook_name} \"$@\"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepo) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, GitRepo { repo })
    }

    #[test]
    fn test_reads_local_config() {
        let (_dir, git) = init_repo();
        let mut config = git.repo.config().unwrap();
        config.set_str("user.name", "Some author name").unwrap();
        config.set_str("user.email", "test@test.loc").unwrap();

        assert_eq!(git.get("user.name").unwrap(), "Some author name");
        assert_eq!(git.get("user.email").unwrap(), "test@test.loc");
    }

    #[test]
    fn test_missing_key_is_empty_string() {
        let (_dir, git) = init_repo();
        assert_eq!(git.get("authorguard.never-set").unwrap(), "");
    }

    #[test]
    fn test_install_and_remove_hook() {
        let (_dir, git) = init_repo();

        let path = git
            .install_hook("pre-commit", &hook_script("pre-commit"), false)
            .unwrap();
        assert!(path.exists());
        assert!(git.is_own_hook("pre-commit").unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("#!/bin/sh\n"));
        assert!(content.contains("authorguard run pre-commit \"$@\""));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }

        // reinstalling our own hook needs no force
        git.install_hook("pre-commit", &hook_script("pre-commit"), false)
            .unwrap();

        assert!(git.remove_hook("pre-commit").unwrap());
        assert!(!git.hook_exists("pre-commit").unwrap());
        assert!(!git.remove_hook("pre-commit").unwrap());
    }

    #[test]
    fn test_foreign_hook_is_protected() {
        let (_dir, git) = init_repo();
        let hooks_dir = git.hooks_dir().unwrap();
        std::fs::create_dir_all(&hooks_dir).unwrap();
        std::fs::write(hooks_dir.join("pre-commit"), "#!/bin/sh\nexit 0\n").unwrap();

        assert!(!git.is_own_hook("pre-commit").unwrap());
        assert!(
            git.install_hook("pre-commit", &hook_script("pre-commit"), false)
                .is_err()
        );
        assert!(!git.remove_hook("pre-commit").unwrap());
        assert!(git.hook_exists("pre-commit").unwrap());

        git.install_hook("pre-commit", &hook_script("pre-commit"), true)
            .unwrap();
        assert!(git.is_own_hook("pre-commit").unwrap());
    }

    #[test]
    fn test_hooks_path_override() {
        let (dir, git) = init_repo();
        git.repo
            .config()
            .unwrap()
            .set_str("core.hooksPath", ".githooks")
            .unwrap();

        std::fs::create_dir_all(dir.path().join(".githooks")).unwrap();
        let hooks_dir = git.hooks_dir().unwrap();
        assert_eq!(
            hooks_dir.canonicalize().unwrap(),
            dir.path().join(".githooks").canonicalize().unwrap()
        );
    }
}
