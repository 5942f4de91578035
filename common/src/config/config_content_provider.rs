use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Raw text source for a config or data document.
pub trait ConfigContentProvider {
    /// `Ok(None)` means the document does not exist yet.
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

#[derive(Clone, Debug)]
pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!(
                "Failed to read {}: {}",
                self.file_path.display(),
                err
            )),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        // Written next to the target and renamed over it, so readers see
        // either the old or the new document.
        let mut temp_name = self.file_path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        std::fs::write(&temp_path, content)
            .map_err(|e| format!("Failed to write {}: {}", temp_path.display(), e))?;
        std::fs::rename(&temp_path, &self.file_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            format!("Failed to replace {}: {}", self.file_path.display(), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("config_provider_{}_{}.yaml", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let provider = FileContentConfigProvider::new(temp_path("missing"));
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_rewrite_replaces_content_without_leftovers() {
        let path = temp_path("rewrite");
        let provider = FileContentConfigProvider::new(&path);

        provider.set_config_content("first: 1\n").unwrap();
        provider.set_config_content("second: 2\n").unwrap();

        assert_eq!(provider.get_config_content(), Ok(Some("second: 2\n".to_string())));
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        assert!(!PathBuf::from(temp_name).exists());

        let _ = std::fs::remove_file(&path);
    }
}
