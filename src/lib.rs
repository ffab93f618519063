//! Calculatrice RPN — évalue une expression infixe en f64.
//!
//! texte -> jetons -> RPN (shunting-yard) -> valeur
//!
//! ```
//! use calculatrice_rpn::calc;
//!
//! assert_eq!(calc("2 + 3 * 4"), Ok(14.0));
//! assert_eq!(calc("3 - -5"), Ok(8.0));
//! assert!(calc("(1 + 2").is_err());
//! ```

pub mod noyau;

pub use noyau::{
    calc, calc_detail, calc_detail_with, calc_with, CalcError, CalcResult, Demarche, ErrorKind,
    Operateur, TableOperateurs,
};
