//! # Corpus Location
//!
//! Resolves the directory holding a raw corpus.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

use crate::errors::{BitextError, Result};

/// Environment variable key to override the default dataset cache directory.
pub const BITEXT_CACHE_DIR: &str = "BITEXT_CACHE_DIR";

/// Default [`CacheDirResolver`] for bitext.
pub const BITEXT_CACHE_CONFIG: CacheDirResolver = CacheDirResolver {
    qualifier: "io.crates.bitext",
    organization: "",
    application: "bitext",
    cache_env_vars: &[BITEXT_CACHE_DIR],
};

/// Static configuration for dataset cache directory resolution.
pub struct CacheDirResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// The resolution order for cache directories environment variables.
    pub cache_env_vars: &'static [&'static str],
}

impl CacheDirResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.organization, self.application, self.qualifier)
    }

    /// Resolve the cache directory.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each `self.cache_env_vars`; in order.
    /// 3. `self.project_dirs().cache_dir()`, if present.
    /// 4. `None`
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path.as_ref() {
            return Some(path.as_ref().to_path_buf());
        }

        for env_var in self.cache_env_vars {
            if let Ok(path) = env::var(env_var) {
                return Some(PathBuf::from(path));
            }
        }

        self.project_dirs().map(|pds| pds.cache_dir().to_path_buf())
    }
}

/// Find the directory of a raw corpus.
///
/// Candidates, in order:
/// 1. `dataset_path[/subset]`
/// 2. `cache_dir/dataset_path[/subset]`, when a cache dir resolves.
///
/// ## Errors
/// * [`BitextError::Corpus`] naming every candidate, when none is a directory.
pub fn resolve_corpus_dir(
    dataset_path: &Path,
    subset: Option<&str>,
    cache_dir: Option<&Path>,
) -> Result<PathBuf> {
    let with_subset = |base: PathBuf| match subset {
        Some(subset) => base.join(subset),
        None => base,
    };

    let mut candidates = vec![with_subset(dataset_path.to_path_buf())];
    if dataset_path.is_relative()
        && let Some(cache_dir) = BITEXT_CACHE_CONFIG.resolve_cache_dir(cache_dir)
    {
        candidates.push(with_subset(cache_dir.join(dataset_path)));
    }

    for candidate in &candidates {
        if candidate.is_dir() {
            log::debug!("corpus dir: {}", candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(BitextError::Corpus(format!(
        "no corpus directory found; tried {candidates:?}"
    )))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;

    const CACHE_ENV1: &str = "_BITEXT_PATH_CACHE_ENV1";
    const CACHE_ENV2: &str = "_BITEXT_PATH_CACHE_ENV2";

    const TEST_CONFIG: CacheDirResolver = CacheDirResolver {
        qualifier: "io",
        organization: "crates",
        application: "example",
        cache_env_vars: &[CACHE_ENV1, CACHE_ENV2],
    };

    #[test]
    #[serial]
    fn test_resolve_cache_dir() {
        let no_path: Option<PathBuf> = None;
        let user_dir = PathBuf::from("/tmp/bitext_cache/user");
        let env_dir1 = PathBuf::from("/tmp/bitext_cache/env.1");
        let env_dir2 = PathBuf::from("/tmp/bitext_cache/env.2");

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }

        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone())),
            Some(user_dir.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            TEST_CONFIG
                .project_dirs()
                .map(|pds| pds.cache_dir().to_path_buf())
        );

        unsafe {
            env::set_var(CACHE_ENV2, env_dir2.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(env_dir2.clone())
        );

        unsafe {
            env::set_var(CACHE_ENV1, env_dir1.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(env_dir1.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone())),
            Some(user_dir)
        );

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }
    }

    #[test]
    #[serial]
    fn test_resolve_corpus_dir() -> Result<()> {
        let tmpdir = TempDir::new("bitext-corpus-dir")?;
        let cache = tmpdir.path().join("cache");
        fs::create_dir_all(cache.join("mt_pairs").join("en-vi"))?;

        let direct = tmpdir.path().join("direct");
        fs::create_dir_all(&direct)?;
        assert_eq!(resolve_corpus_dir(&direct, None, None)?, direct);

        let found = resolve_corpus_dir(Path::new("mt_pairs"), Some("en-vi"), Some(&cache))?;
        assert_eq!(found, cache.join("mt_pairs").join("en-vi"));

        let err = resolve_corpus_dir(Path::new("missing_corpus"), None, Some(&cache));
        assert!(matches!(err, Err(BitextError::Corpus(_))));
        Ok(())
    }
}
