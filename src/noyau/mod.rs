//! Noyau flottant (f64)
//!
//! Organisation interne :
//! - table.rs    : table des opérateurs (symbole -> descripteur), figée au démarrage
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + évaluation de la RPN
//! - erreur.rs   : erreurs (lexicale / syntaxe / évaluation / domaine)
//! - format.rs   : affichage d’une valeur
//! - eval.rs     : pipeline complet

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod table;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreur::{CalcError, CalcResult, ErrorKind};
pub use eval::{calc, calc_detail, calc_detail_with, calc_with, Demarche};
pub use table::{Operateur, TableOperateurs};
