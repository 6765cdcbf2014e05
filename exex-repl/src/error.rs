use ariadne::Source;
use exex_error::Error as ParseError;
use exex_model::ModelError;

/// Utility enum to package errors that can occur while parsing / building.
#[derive(Debug)]
pub enum Error {
    /// A parse error, along with the text that was parsed.
    Parse { source: String, error: ParseError },

    /// A coin term given to `:coins` was not exactly one term.
    NotACoinTerm(String),

    /// `:coins` was used before any target was entered.
    NoTarget,

    /// The model refused a request.
    Model(ModelError),
}

impl Error {
    /// Report the error to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not implement `Display`, so
    /// parse errors are printed with its `eprint` method.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Parse { source, error } => {
                let report = error.build_report("input");
                if let Err(err) = report.eprint(("input", Source::from(source))) {
                    eprintln!("could not print the error report: {}", err);
                }
            },
            Self::NotACoinTerm(token) => {
                eprintln!("`{}` is not a single coin term, such as `2x` or `-1`", token);
            },
            Self::NoTarget => eprintln!("enter a target expression before using `:coins`"),
            Self::Model(err) => eprintln!("{}", err),
        }
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}
