// src/noyau/erreur.rs
//
// Erreurs du noyau : une seule enum, classée en quatre familles
// (lexicale, syntaxe, évaluation, domaine).
// Toutes les erreurs sont terminales pour un appel de `calc`.

/// Famille d’une erreur (taxonomie exposée à l’appelant).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Eval,
    Domain,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalcError {
    /* ------------------------ Lexicales ------------------------ */
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /* ------------------------ Syntaxe ------------------------ */
    #[error("unmatched bracket: '{0}'")]
    UnmatchedBracket(char),

    /* ------------------------ Évaluation ------------------------ */
    #[error("stack underflow: '{0}' is missing an operand")]
    StackUnderflow(&'static str),

    #[error("unary not supported: '{0}'")]
    UnaryNotSupported(&'static str),

    #[error("binary not supported: '{0}'")]
    BinaryNotSupported(&'static str),

    #[error("malformed expression: {0} values left on the stack")]
    Malformed(usize),

    #[error("empty expression")]
    Empty,

    #[error("unexpected bracket in RPN: '{0}'")]
    BracketInRpn(char),

    /* ------------------------ Domaine ------------------------ */
    #[error("shift requires integral operands: {a} {symbole} {b}")]
    ShiftNotIntegral {
        symbole: &'static str,
        a: f64,
        b: f64,
    },

    #[error("negative shift count: {0}")]
    NegativeShift(f64),

    #[error("division by zero: {a} {symbole} 0")]
    DivisionByZero { symbole: &'static str, a: f64 },

    #[error("not a number: '{symbole}' applied to {operandes}")]
    NotANumber {
        symbole: &'static str,
        operandes: String,
    },

    #[error("out of range: '{symbole}' applied to {operandes}")]
    OutOfRange {
        symbole: &'static str,
        operandes: String,
    },
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        use CalcError::*;

        match self {
            InvalidValue(_) => ErrorKind::Lex,
            UnmatchedBracket(_) => ErrorKind::Syntax,
            StackUnderflow(_)
            | UnaryNotSupported(_)
            | BinaryNotSupported(_)
            | Malformed(_)
            | Empty
            | BracketInRpn(_) => ErrorKind::Eval,
            ShiftNotIntegral { .. }
            | NegativeShift(_)
            | DivisionByZero { .. }
            | NotANumber { .. }
            | OutOfRange { .. } => ErrorKind::Domain,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
