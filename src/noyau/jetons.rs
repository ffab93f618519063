// src/noyau/jetons.rs

use super::erreur::{CalcError, CalcResult};
use super::table::{Operateur, TableOperateurs};

#[derive(Clone, Copy, Debug)]
pub enum Tok {
    Num(f64),
    // copie propre à l’occurrence (le convertisseur peut la marquer unaire)
    Op(Operateur),
    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - tout symbole de la table, le plus long d’abord ("<<" n’est jamais "<" "<")
/// - espaces optionnels : "1+2" == "1 + 2"
/// - nombres flottants (12, 1.5, .5, 1e3, 1e-5, 2.5E+3, inf, nan)
/// - un lexème qui n’est ni symbole ni nombre => erreur "invalid value"
pub fn tokenize(s: &str, table: &TableOperateurs) -> CalcResult<Vec<Tok>> {
    let mut out = Vec::new();
    let mut lexeme = String::new();
    let mut i: usize = 0;

    while let Some(c) = s[i..].chars().next() {
        if c.is_whitespace() {
            fermer_lexeme(&mut lexeme, &mut out)?;
            i += c.len_utf8();
            continue;
        }

        // Signe d’exposant : "1e-5" reste un seul nombre
        if (c == '+' || c == '-') && attend_exposant(&lexeme) {
            lexeme.push(c);
            i += 1;
            continue;
        }

        if let Some(op) = table.correspondance(&s[i..]) {
            fermer_lexeme(&mut lexeme, &mut out)?;
            i += op.symbole.len();
            out.push(jeton_symbole(op));
            continue;
        }

        lexeme.push(c);
        i += c.len_utf8();
    }

    fermer_lexeme(&mut lexeme, &mut out)?;
    Ok(out)
}

fn jeton_symbole(op: Operateur) -> Tok {
    match op.symbole {
        "(" => Tok::LPar,
        ")" => Tok::RPar,
        _ => Tok::Op(op),
    }
}

fn fermer_lexeme(lexeme: &mut String, out: &mut Vec<Tok>) -> CalcResult<()> {
    if lexeme.is_empty() {
        return Ok(());
    }
    let v: f64 = lexeme
        .parse()
        .map_err(|_| CalcError::InvalidValue(lexeme.clone()))?;
    out.push(Tok::Num(v));
    lexeme.clear();
    Ok(())
}

/// Vrai si le lexème est une mantisse suivie de 'e'/'E' ("1e", "2.5E", ".5e").
fn attend_exposant(lexeme: &str) -> bool {
    let Some(mantisse) = lexeme
        .strip_suffix('e')
        .or_else(|| lexeme.strip_suffix('E'))
    else {
        return false;
    };

    mantisse.chars().any(|c| c.is_ascii_digit())
        && mantisse.chars().all(|c| c.is_ascii_digit() || c == '.')
        && mantisse.matches('.').count() <= 1
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
/// Une occurrence unaire d’un opérateur qui a aussi une forme binaire
/// (ou qui n’a pas de forme unaire) est préfixée par 'u' : "u-", "u*".
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(op) if op.est_unaire && (op.binaire.is_some() || op.unaire.is_none()) => {
                format!("u{}", op.symbole)
            }
            Tok::Op(op) => op.symbole.to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
