// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Unaire ou binaire : décidé par le jeton PRÉCÉDENT, pas par le symbole.
//   Si le précédent ne termine pas un opérande (nombre ou ')'), l’occurrence
//   est marquée unaire, même pour '*' : l’échec arrive alors à l’évaluation.
// - Priorité : plus petite valeur = liaison plus forte. Un binaire fait sortir
//   tant que sa priorité >= celle du sommet ; un unaire ne fait rien sortir.
// - Parenthèse non fermée / fermante orpheline => erreur de syntaxe.

use tracing::trace;

use super::erreur::{CalcError, CalcResult};
use super::jetons::Tok;

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(+), Num(3), Op(*), Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Op(*), Op(+)]
pub fn to_rpn(tokens: &[Tok]) -> CalcResult<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // Au départ on est "comme après un opérateur" : "-5" est permis.
    let mut prev_fin_operande = false;

    for tok in tokens.iter().copied() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_fin_operande = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_fin_operande = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(CalcError::UnmatchedBracket(')')),
                    }
                }
                // une expression fermée est un opérande : "(2+3) * 4"
                prev_fin_operande = true;
            }

            Tok::Op(mut op) => {
                if !prev_fin_operande {
                    op.est_unaire = true;
                }

                if !op.est_unaire {
                    while let Some(&Tok::Op(top)) = ops.last() {
                        if op.priorite < top.priorite {
                            break;
                        }
                        trace!(entrant = op.symbole, sortant = top.symbole, "dépile");
                        ops.pop();
                        out.push(Tok::Op(top));
                    }
                }

                ops.push(Tok::Op(op));
                prev_fin_operande = false;
            }
        }
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        if matches!(top, Tok::LPar) {
            return Err(CalcError::UnmatchedBracket('('));
        }
        out.push(top);
    }

    Ok(out)
}

/// Évalue une RPN. Binaire : `b` (sommet) puis `a`, et f(a, b).
pub fn eval_rpn(rpn: &[Tok]) -> CalcResult<f64> {
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match *tok {
            Tok::Num(v) => pile.push(v),

            Tok::Op(op) => {
                let v = if op.est_unaire {
                    let f = op.fonction_unaire()?;
                    let x = pile.pop().ok_or(CalcError::StackUnderflow(op.symbole))?;
                    op.controler_domaine(f(x)?, &[x])?
                } else {
                    let f = op.fonction_binaire()?;
                    let b = pile.pop().ok_or(CalcError::StackUnderflow(op.symbole))?;
                    let a = pile.pop().ok_or(CalcError::StackUnderflow(op.symbole))?;
                    op.controler_domaine(f(a, b)?, &[a, b])?
                };
                trace!(symbole = op.symbole, unaire = op.est_unaire, v, "applique");
                pile.push(v);
            }

            Tok::LPar => return Err(CalcError::BracketInRpn('(')),
            Tok::RPar => return Err(CalcError::BracketInRpn(')')),
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        [] => Err(CalcError::Empty),
        reste => Err(CalcError::Malformed(reste.len())),
    }
}
