// src/main.rs
//
// Calculatrice RPN — point d’entrée en ligne de commande
// ------------------------------------------------------
// But:
// - évaluer les expressions passées en arguments
// - sinon, lire stdin ligne par ligne (une expression par ligne)
// - traces via RUST_LOG (ou --log-level si RUST_LOG est absent)
//
// Ici: point d’entrée seulement, aucune logique de calcul (tout est dans noyau).

use std::io::{self, BufRead};

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_rpn::noyau::format::format_valeur;
use calculatrice_rpn::{calc, calc_detail};

/// Précision d’affichage par défaut.
const DIGITS_DEFAUT: usize = 12;

/// Garde-fou : on borne la précision (f64 n’en porte pas plus).
const DIGITS_MAX: usize = 17;

/// Évalue des expressions arithmétiques infixes (+ - * / % ^ << >> sin cos tan sqrt round abs)
#[derive(Parser)]
#[command(name = "calculatrice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Expressions à évaluer (sinon: lecture de stdin)
    #[arg(allow_hyphen_values = true)]
    expressions: Vec<String>,

    /// Nombre de décimales affichées
    #[arg(short, long, default_value_t = DIGITS_DEFAUT)]
    digits: usize,

    /// Affiche la démarche (jetons + RPN)
    #[arg(long)]
    demarche: bool,

    /// Filtre de traces si RUST_LOG n’est pas défini
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn installer_traces(defaut: &str) {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

/// Évalue une ligne et l’affiche. Retourne false si l’évaluation a échoué.
fn traiter(expr: &str, cli: &Cli, digits: usize) -> bool {
    let res = if cli.demarche {
        calc_detail(expr).map(|(v, d)| {
            println!("jetons: {}", d.jetons);
            println!("rpn:    {}", d.rpn);
            v
        })
    } else {
        calc(expr)
    };

    match res {
        Ok(v) => {
            println!("{}", format_valeur(v, digits));
            true
        }
        Err(e) => {
            eprintln!("erreur: {e}");
            false
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    installer_traces(&cli.log_level);

    let digits = cli.digits.clamp(0, DIGITS_MAX);
    let mut echecs = 0usize;

    if cli.expressions.is_empty() {
        for ligne in io::stdin().lock().lines() {
            let ligne = ligne?;
            if ligne.trim().is_empty() {
                continue;
            }
            if !traiter(&ligne, &cli, digits) {
                echecs += 1;
            }
        }
    } else {
        for expr in &cli.expressions {
            if !traiter(expr, &cli, digits) {
                echecs += 1;
            }
        }
    }

    if echecs > 0 {
        bail!("{echecs} expression(s) en erreur");
    }
    Ok(())
}
