//! The languages and benchmarks the harness knows about.
//!
//! Both tables are plain in-source data. To add an interpreter or a benchmark, add a row and
//! rebuild.

/// Number of times each (language, benchmark) pair is run.
pub const ITERATIONS: usize = 30;

/// Everything needed to invoke one interpreter on a benchmark source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Label printed in reports.
    pub name: String,
    /// Directory, relative to the harness directory, holding this language's sources.
    pub folder: String,
    /// Source file extension, without the dot.
    pub extension: String,
    program: String,
    args: Vec<String>,
}

impl Language {
    /// Creates a language whose command is just `program`. Fixed leading arguments are added
    /// with [`arg`](Language::arg).
    pub fn new<S: Into<String>>(name: S, folder: S, extension: S, program: S) -> Language {
        Language {
            name: name.into(),
            folder: folder.into(),
            extension: extension.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends a fixed argument, passed before the source path.
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Language {
        self.args.push(arg.into());
        self
    }

    /// The executable, i.e. the first command token.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The fixed leading arguments, i.e. every command token after the first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// All command tokens in order. Never empty.
    pub fn command(&self) -> Vec<&str> {
        let mut command = Vec::with_capacity(self.args.len() + 1);
        command.push(self.program.as_str());
        command.extend(self.args.iter().map(String::as_str));
        command
    }

    /// `<folder>/<name>.<extension>`.
    ///
    /// This is the value handed to the child, so it is always joined with `/` whatever the host
    /// separator is.
    pub fn source_path(&self, benchmark: &Benchmark) -> String {
        format!("{}/{}.{}", self.folder, benchmark.name, self.extension)
    }
}

/// A benchmark program, present once per language folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    /// Label printed in reports.
    pub display_name: String,
    /// Stem of the source file name.
    pub name: String,
}

impl Benchmark {
    /// Creates a benchmark whose sources are `<folder>/<name>.<extension>` for every language.
    pub fn new<S: Into<String>>(display_name: S, name: S) -> Benchmark {
        Benchmark {
            display_name: display_name.into(),
            name: name.into(),
        }
    }
}

/// The interpreters under comparison, in report order.
pub fn languages() -> Vec<Language> {
    vec![
        Language::new("Hydrogen", "hydrogen", "hy", "../build/interpreter"),
        Language::new("Lua", "lua", "lua", "lua5.1"),
        Language::new("LuaJIT", "lua", "lua", "luajit").arg("-joff"),
        Language::new("Python 2.7.8", "python", "py", "python"),
        Language::new("Python 3.4.2", "python", "py", "python3"),
    ]
}

/// The benchmark suite, in report order.
pub fn benchmarks() -> Vec<Benchmark> {
    vec![Benchmark::new("Fibonacci", "fib")]
}
