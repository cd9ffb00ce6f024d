use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk layout for one run: downloaded PDFs, a permanent PDF archive,
/// and the three text stages (raw extraction, cleaned, formatted).
#[derive(Debug, Clone)]
pub struct MenuStore {
    root: PathBuf,
}

impl MenuStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pdf_dir(&self) -> PathBuf {
        self.root.join("pdf")
    }

    fn archive_dir(&self) -> PathBuf {
        self.root.join("pdf-archive")
    }

    fn dirty_dir(&self) -> PathBuf {
        self.root.join("dirty-txt")
    }

    fn clean_dir(&self) -> PathBuf {
        self.root.join("clean-txt")
    }

    fn blog_dir(&self) -> PathBuf {
        self.root.join("blog-txt")
    }

    pub fn pdf_path(&self, name: &str) -> PathBuf {
        self.pdf_dir().join(format!("{name}.pdf"))
    }

    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.archive_dir().join(format!("{name}.pdf"))
    }

    pub fn dirty_path(&self, name: &str) -> PathBuf {
        self.dirty_dir().join(format!("{name}.txt"))
    }

    pub fn clean_path(&self, name: &str) -> PathBuf {
        self.clean_dir().join(format!("{name}.txt"))
    }

    pub fn blog_path(&self, name: &str) -> PathBuf {
        self.blog_dir().join(format!("{name}.txt"))
    }

    /// Create the directory tree. With `clear`, generated directories are
    /// wiped first; the archive is left alone.
    pub fn prepare(&self, clear: bool) -> io::Result<()> {
        if clear && self.root.exists() {
            for dir in [self.pdf_dir(), self.dirty_dir(), self.clean_dir(), self.blog_dir()] {
                if dir.exists() {
                    tracing::debug!(dir = %dir.display(), "clearing");
                    fs::remove_dir_all(&dir)?;
                }
            }
        }
        for dir in [
            self.root.clone(),
            self.pdf_dir(),
            self.archive_dir(),
            self.dirty_dir(),
            self.clean_dir(),
            self.blog_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn has_pdf(&self, name: &str) -> bool {
        self.pdf_path(name).exists()
    }

    /// Store a downloaded PDF, keeping the first copy ever seen in the archive.
    pub fn save_pdf(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.pdf_path(name), bytes)?;
        let archive = self.archive_path(name);
        if !archive.exists() {
            tracing::info!(path = %archive.display(), "storing archive copy");
            fs::write(archive, bytes)?;
        }
        Ok(())
    }

    pub fn read_pdf(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.pdf_path(name))
    }

    /// Names of the PDFs currently in the pdf directory, sorted.
    pub fn pdf_names(&self) -> io::Result<Vec<String>> {
        names_with_extension(&self.pdf_dir(), "pdf")
    }

    /// Names with extracted text available, sorted.
    pub fn dirty_names(&self) -> io::Result<Vec<String>> {
        names_with_extension(&self.dirty_dir(), "txt")
    }

    /// Delete generated text for `name` so a failed run never leaves stale
    /// output behind.
    pub fn remove_outputs(&self, name: &str) -> io::Result<()> {
        for path in [self.dirty_path(name), self.clean_path(name), self.blog_path(name)] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn write_dirty(&self, name: &str, text: &str) -> io::Result<()> {
        fs::write(self.dirty_path(name), text)
    }

    pub fn read_dirty(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.dirty_path(name))
    }

    pub fn write_clean(&self, name: &str, text: &str) -> io::Result<()> {
        fs::write(self.clean_path(name), text)
    }

    pub fn write_blog(&self, name: &str, text: &str) -> io::Result<()> {
        fs::write(self.blog_path(name), text)
    }
}

fn names_with_extension(dir: &Path, ext: &str) -> io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}
