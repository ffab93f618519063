//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> valeur
//!
//! Chaque étape est pure ; seule la table (immuable) est partagée.
//! Toute erreur interrompt l’appel : pas d’état partiel, pas de reprise.
//! L’entrée est TOUJOURS de l’infixe : "1 2 +" n’est pas lu comme de la RPN
//! (il se trouve qu’il se convertit en "1 2 +" et vaut 3).

use tracing::debug;

use super::erreur::CalcResult;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};
use super::table::TableOperateurs;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression infixe avec la table standard.
pub fn calc(expr: &str) -> CalcResult<f64> {
    calc_with(TableOperateurs::standard(), expr)
}

/// Même chose avec une table fournie explicitement.
#[tracing::instrument(level = "debug", skip(table))]
pub fn calc_with(table: &TableOperateurs, expr: &str) -> CalcResult<f64> {
    let pipeline = || -> CalcResult<f64> {
        let jetons = tokenize(expr, table)?;
        let rpn = to_rpn(&jetons)?;
        eval_rpn(&rpn)
    };

    pipeline()
        .inspect(|v| debug!(resultat = v, "ok"))
        .inspect_err(|e| debug!(erreur = %e, famille = ?e.kind(), "échec"))
}

/// Évalue et retourne aussi la démarche (jetons, RPN).
pub fn calc_detail(expr: &str) -> CalcResult<(f64, Demarche)> {
    calc_detail_with(TableOperateurs::standard(), expr)
}

pub fn calc_detail_with(table: &TableOperateurs, expr: &str) -> CalcResult<(f64, Demarche)> {
    // 1) Jetons
    let jetons = tokenize(expr, table)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Valeur
    let v = eval_rpn(&rpn)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
    };
    Ok((v, d))
}
