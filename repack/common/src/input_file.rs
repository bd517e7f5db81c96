use std::path::PathBuf;

/// The id of a source file registered in [`InputFiles`]
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct CodeId(pub usize);

#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Code {
    pub source: String,
    pub path: Option<PathBuf>,
}

impl Code {
    /// Returns the 1-based `line` of this file, without its line terminator
    pub fn line(&self, line: usize) -> Option<&str> {
        let index = line.checked_sub(1)?;
        self.source
            .split('\n')
            .nth(index)
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    pub fn display_path(&self) -> Option<String> {
        self.path.as_deref().map(|path| path.display().to_string())
    }
}

/// Every source file that takes part in the current compilation
#[derive(Debug, Default)]
pub struct InputFiles {
    input_files: Vec<Code>,
}

impl InputFiles {
    pub fn add_input(&mut self, code: Code) -> CodeId {
        self.input_files.push(code);
        CodeId(self.input_files.len() - 1)
    }

    pub fn get_input(&self, CodeId(id): CodeId) -> &Code {
        &self.input_files[id]
    }

    pub fn len(&self) -> usize {
        self.input_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Code, InputFiles};

    #[test]
    fn lines_are_one_based() {
        let code = Code {
            source: "let a = \"b\"\r\nmatch {\n}".to_string(),
            path: None,
        };
        assert_eq!(code.line(0), None);
        assert_eq!(code.line(1), Some("let a = \"b\""));
        assert_eq!(code.line(3), Some("}"));
        assert_eq!(code.line(4), None);
    }

    #[test]
    fn register_files() {
        let mut files = InputFiles::default();
        let id = files.add_input(Code {
            source: String::new(),
            path: Some("pack/swords.rep".into()),
        });
        assert_eq!(
            files.get_input(id).path.as_deref(),
            Some(Path::new("pack/swords.rep"))
        );
        assert_eq!(files.len(), 1);
    }
}
