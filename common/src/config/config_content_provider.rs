#[cfg(test)]
use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait ConfigContentProvider {
    /// `Ok(None)` means there is no stored config yet.
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
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
                "Failed to read config file {}: {}",
                self.file_path.display(),
                err
            )),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.file_path, content).map_err(|e| {
            format!(
                "Failed to write config file {}: {}",
                self.file_path.display(),
                e
            )
        })
    }
}

/// Keeps config text in memory; used where no file should be touched.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryContentProvider {
    content: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryContentProvider {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content: RefCell::new(content),
        }
    }
}

#[cfg(test)]
impl ConfigContentProvider for MemoryContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        Ok(self.content.borrow().clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        *self.content.borrow_mut() = Some(content.to_string());
        Ok(())
    }
}
