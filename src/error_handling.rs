use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("'{0}' is neither a name nor a number")]
    invalid_token(String),

    #[error("the '{0}' operator has been misplaced")]
    invalid_operator(String),

    #[error("did not expect '{0}'")]
    did_not_expect(String),

    #[error("could not find '{0}'")]
    could_not_find(String),

    #[error("identifier, '{0}', is not defined")]
    undefined(String),

    #[error("index {index} is out of range for '{name}' of size {len}")]
    index_out_of_range {
        name: String,
        index: i64,
        len: usize,
    },

    #[error("'{0}' is a scalar but was assigned like an array")]
    kind_mismatch(String),

    #[error("missing value after index '{0}'")]
    missing_field(String),

    #[error("brackets are not legally matched")]
    unbalanced_brackets,

    #[error("cannot allocate an array of {0} values")]
    too_large(usize),

    #[error("brackets nest deeper than {0} levels")]
    too_deep(usize),

    #[error("expression ended abruptly")]
    abrupt_end,

    #[error("could not read symbol values")]
    io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    assignment {
        line: usize,
        #[source]
        source: Box<CalcError>,
    },
}

pub type Result<T> = std::result::Result<T, CalcError>;
