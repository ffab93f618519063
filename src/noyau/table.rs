// src/noyau/table.rs
//
// Table des opérateurs : symbole -> descripteur (fonctions, priorité).
//
// Règles:
// - Construite une seule fois, jamais modifiée ensuite (lecture seule partagée).
// - `lookup` rend une COPIE : marquer une occurrence "unaire" ne touche
//   ni la table ni les autres jetons du même symbole.
// - Priorité : plus petite valeur = liaison plus forte. '(' vaut 11 et ne sort
//   jamais par la règle de priorité, seulement par ')'.

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use super::erreur::{CalcError, CalcResult};

pub type FnBinaire = fn(f64, f64) -> CalcResult<f64>;
pub type FnUnaire = fn(f64) -> CalcResult<f64>;

/// Priorité par défaut (unaires nommés, '+', '-', ')').
pub const PRIORITE_DEFAUT: u8 = 9;

/// Au-delà, `a << n` ne tient plus dans un f64 (sauf a = 0).
const DECALAGE_GAUCHE_MAX: f64 = 1100.0;

/// Au-delà, `a >> n` vaut 0 ou -1 pour tout a fini.
const DECALAGE_DROITE_MAX: f64 = 2048.0;

/// Descripteur d’un opérateur. `Copy` : chaque jeton porte le sien.
#[derive(Clone, Copy, Debug)]
pub struct Operateur {
    pub symbole: &'static str,
    pub binaire: Option<FnBinaire>,
    pub unaire: Option<FnUnaire>,
    pub priorite: u8,
    /// Vrai pour CETTE occurrence seulement (décidé par le convertisseur).
    pub est_unaire: bool,
}

impl Operateur {
    pub const fn new(symbole: &'static str, priorite: u8) -> Self {
        Self {
            symbole,
            binaire: None,
            unaire: None,
            priorite,
            est_unaire: false,
        }
    }

    pub fn avec_binaire(mut self, f: FnBinaire) -> Self {
        self.binaire = Some(f);
        self
    }

    pub fn avec_unaire(mut self, f: FnUnaire) -> Self {
        self.unaire = Some(f);
        self
    }

    pub fn fonction_unaire(&self) -> CalcResult<FnUnaire> {
        self.unaire
            .ok_or(CalcError::UnaryNotSupported(self.symbole))
    }

    pub fn fonction_binaire(&self) -> CalcResult<FnBinaire> {
        self.binaire
            .ok_or(CalcError::BinaryNotSupported(self.symbole))
    }

    /// NaN ou infini produit à partir d’opérandes finis => erreur de domaine.
    /// Un `nan`/`inf` littéral en entrée traverse sans erreur.
    pub fn controler_domaine(&self, resultat: f64, operandes: &[f64]) -> CalcResult<f64> {
        if resultat.is_finite() || operandes.iter().any(|x| !x.is_finite()) {
            return Ok(resultat);
        }

        let operandes = operandes
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if resultat.is_nan() {
            Err(CalcError::NotANumber {
                symbole: self.symbole,
                operandes,
            })
        } else {
            Err(CalcError::OutOfRange {
                symbole: self.symbole,
                operandes,
            })
        }
    }
}

/* ------------------------ Table ------------------------ */

#[derive(Clone, Debug)]
pub struct TableOperateurs {
    // triés par longueur de symbole décroissante (scan "le plus long d’abord")
    ops: Vec<Operateur>,
}

impl TableOperateurs {
    pub fn new(ops: impl IntoIterator<Item = Operateur>) -> Self {
        // un symbole vide préfixe tout : le scan n’avancerait plus
        let mut ops: Vec<Operateur> = ops
            .into_iter()
            .filter(|o| !o.symbole.is_empty())
            .collect();
        ops.sort_by_key(|o| std::cmp::Reverse(o.symbole.len()));
        Self { ops }
    }

    /// Table partagée du processus (initialisée une seule fois, thread-safe).
    pub fn standard() -> &'static TableOperateurs {
        static TABLE: OnceLock<TableOperateurs> = OnceLock::new();
        TABLE.get_or_init(Self::construire_standard)
    }

    fn construire_standard() -> Self {
        Self::new([
            Operateur::new("+", PRIORITE_DEFAUT)
                .avec_binaire(addition)
                .avec_unaire(plus),
            Operateur::new("-", PRIORITE_DEFAUT)
                .avec_binaire(soustraction)
                .avec_unaire(oppose),
            Operateur::new("*", 8).avec_binaire(multiplication),
            Operateur::new("/", 8).avec_binaire(division),
            Operateur::new("%", 8).avec_binaire(modulo),
            Operateur::new("^", 7).avec_binaire(puissance),
            Operateur::new("<<", 10).avec_binaire(decalage_gauche),
            Operateur::new(">>", 10).avec_binaire(decalage_droite),
            Operateur::new("sin", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.sin())),
            Operateur::new("cos", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.cos())),
            Operateur::new("tan", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.tan())),
            Operateur::new("sqrt", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.sqrt())),
            Operateur::new("round", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.round_ties_even())),
            Operateur::new("abs", PRIORITE_DEFAUT).avec_unaire(|x| Ok(x.abs())),
            Operateur::new("(", 11),
            Operateur::new(")", PRIORITE_DEFAUT),
        ])
    }

    /// Copie fraîche du descripteur associé à `symbole`.
    pub fn lookup(&self, symbole: &str) -> Option<Operateur> {
        self.ops.iter().find(|o| o.symbole == symbole).copied()
    }

    /// Symbole le plus long qui préfixe `reste` (copie fraîche).
    pub fn correspondance(&self, reste: &str) -> Option<Operateur> {
        self.ops.iter().find(|o| reste.starts_with(o.symbole)).copied()
    }

    pub fn symboles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.iter().map(|o| o.symbole)
    }
}

/* ------------------------ Fonctions numériques ------------------------ */

fn addition(a: f64, b: f64) -> CalcResult<f64> {
    Ok(a + b)
}

fn soustraction(a: f64, b: f64) -> CalcResult<f64> {
    Ok(a - b)
}

fn multiplication(a: f64, b: f64) -> CalcResult<f64> {
    Ok(a * b)
}

fn plus(x: f64) -> CalcResult<f64> {
    Ok(x)
}

fn oppose(x: f64) -> CalcResult<f64> {
    Ok(-x)
}

fn division(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero { symbole: "/", a });
    }
    Ok(a / b)
}

/// Modulo "plancher" : le reste prend le signe du diviseur ((-7) % 3 = 2).
fn modulo(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero { symbole: "%", a });
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn puissance(a: f64, b: f64) -> CalcResult<f64> {
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::DivisionByZero { symbole: "^", a });
    }
    Ok(a.powf(b))
}

fn est_entier(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

/// Opérandes d’un décalage : (valeur exacte, nombre de positions).
fn operandes_decalage(symbole: &'static str, a: f64, b: f64) -> CalcResult<(BigInt, f64)> {
    if !est_entier(a) || !est_entier(b) {
        return Err(CalcError::ShiftNotIntegral { symbole, a, b });
    }
    if b < 0.0 {
        return Err(CalcError::NegativeShift(b));
    }
    let n = BigInt::from_f64(a).ok_or(CalcError::ShiftNotIntegral { symbole, a, b })?;
    Ok((n, b))
}

fn vers_f64(symbole: &'static str, n: &BigInt, a: f64, b: f64) -> CalcResult<f64> {
    n.to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::OutOfRange {
            symbole,
            operandes: format!("{a}, {b}"),
        })
}

fn decalage_gauche(a: f64, b: f64) -> CalcResult<f64> {
    let (n, b) = operandes_decalage("<<", a, b)?;
    if n.is_zero() {
        return Ok(0.0);
    }
    if b > DECALAGE_GAUCHE_MAX {
        return Err(CalcError::OutOfRange {
            symbole: "<<",
            operandes: format!("{a}, {b}"),
        });
    }
    let r = n << (b as usize);
    vers_f64("<<", &r, a, b)
}

/// Décalage arithmétique : arrondi vers -inf (-5 >> 1 = -3).
fn decalage_droite(a: f64, b: f64) -> CalcResult<f64> {
    let (n, b) = operandes_decalage(">>", a, b)?;
    let r = n >> (b.min(DECALAGE_DROITE_MAX) as usize);
    vers_f64(">>", &r, a, b)
}
