//! Tests scientifiques (campagne) : propriétés attendues du pipeline complet.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - "3 * -2" : le '-' est unaire (précédé de '*'), le '*' reste binaire
//!   (précédé de 3). Résultat -6, aucune erreur.
//! - Un binaire sans forme unaire en tête ("* 3") passe la conversion et
//!   échoue à l’évaluation (erreur d’évaluation, pas de syntaxe).
//! - Les fonctions nommées ont la priorité 9 (comme '+' et '-') : elles
//!   prennent tout le terme en '*' '/' '%' '^' qui suit ("sqrt 9 * 4" = √36),
//!   et s’arrêtent au premier '+', '-', '<<' ou '>>'.

use std::time::{Duration, Instant};

use super::erreur::{CalcError, ErrorKind};
use super::{calc, calc_detail};

fn eval_ok(expr: &str) -> f64 {
    calc(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_val(expr: &str, attendu: f64) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

fn assert_famille(expr: &str, attendu: ErrorKind) {
    match calc(expr) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer, obtenu {v}"),
        Err(e) => assert_eq!(e.kind(), attendu, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Priorités ------------------------ */

#[test]
fn sci_priorite_sans_parentheses() {
    assert_val("2 + 3 * 4", 14.0);
    assert_val("(2 + 3) * 4", 20.0);
    assert_val("2 * 3 ^ 2", 18.0);
    assert_val("1 + 2 << 1", 6.0);
    assert_val("10 - 4 - 3", 3.0);
    assert_val("100 / 10 / 5", 2.0);
}

/* ------------------------ Unaire / binaire ------------------------ */

#[test]
fn sci_unaire_desambiguisation() {
    assert_val("-5 + 3", -2.0);
    assert_val("3 - -5", 8.0);
    assert_val("3 * -2", -6.0);
    assert_val("+4", 4.0);
    assert_val("- - 5", 5.0);
    assert_val("(2) - 1", 1.0);
}

#[test]
fn sci_binaire_en_position_unaire_echoue_tard() {
    assert_eq!(calc("* 3"), Err(CalcError::UnaryNotSupported("*")));
    assert_eq!(calc("(/ 2)"), Err(CalcError::UnaryNotSupported("/")));
    assert_famille("<< 1", ErrorKind::Eval);
}

#[test]
fn sci_fonctions_nommees() {
    assert_val("sqrt 9 + 1", 4.0);
    assert_val("sqrt(9 + 7)", 4.0);
    assert_val("abs -3 * 2", 6.0);
    assert_val("2 * sqrt 16", 8.0);
    assert_val("round(7 / 2)", 4.0);
    // le terme multiplicatif entier passe sous la fonction
    assert_val("sqrt 9 * 4", 6.0);
    assert_val("sqrt 4 ^ 2", 4.0);
    assert_eq!(calc_detail("sqrt 9 * 4").unwrap().1.rpn, "9 4 * sqrt");
    assert_eq!(calc_detail("abs -3 * 2").unwrap().1.rpn, "3 2 * u- abs");
}

/* ------------------------ Parenthèses ------------------------ */

#[test]
fn sci_parentheses_imbriquees() {
    assert_val("(1 + (2 * 3))", 7.0);
    assert_val("((((1))))", 1.0);
    assert_val("(1 + 2) * (3 + 4)", 21.0);
}

#[test]
fn sci_parentheses_orphelines() {
    assert_eq!(calc("(1 + 2"), Err(CalcError::UnmatchedBracket('(')));
    assert_eq!(calc("1 + 2)"), Err(CalcError::UnmatchedBracket(')')));
    assert_famille("((1)", ErrorKind::Syntax);
}

/* ------------------------ Décalages ------------------------ */

#[test]
fn sci_decalages_integralite() {
    assert_val("4 << 1", 8.0);
    assert_val("4>>1", 2.0);
    assert_val("2.0 << 2", 8.0);
    assert!(matches!(
        calc("4.5 << 1"),
        Err(CalcError::ShiftNotIntegral { symbole: "<<", .. })
    ));
    assert_famille("4 >> 0.5", ErrorKind::Domain);
    assert_famille("4 << -1", ErrorKind::Domain);
}

/* ------------------------ Entrée "RPN" ------------------------ */

#[test]
fn sci_entree_rpn_par_accident() {
    // infixe seulement : "1 2 +" se trouve convertir en "1 2 +"
    let (v, d) = calc_detail("1 2 +").unwrap();
    assert_eq!(v, 3.0);
    assert_eq!(d.rpn, "1 2 +");
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    for expr in ["-5 + 3", "sqrt 9 + 1", "4.5 << 1", "(1 + 2", "3 - -5"] {
        let premier = calc(expr);
        for _ in 0..50 {
            assert_eq!(calc(expr), premier, "expr={expr:?}");
            budget(t0, max);
        }
    }
}

#[test]
fn sci_appels_concurrents() {
    let handles: Vec<_> = (0..8)
        .map(|k| std::thread::spawn(move || calc(&format!("{k} * 2 + 1"))))
        .collect();

    for (k, h) in handles.into_iter().enumerate() {
        let v = h.join().unwrap_or_else(|_| panic!("thread {k} a paniqué"));
        assert_eq!(v, Ok(k as f64 * 2.0 + 1.0));
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["1"; 2000].join(" + ");
    budget(t0, max);

    assert_val(&expr, 2000.0);
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_parentheses() {
    // pas de récursion : la profondeur n’est bornée que par la mémoire
    let n = 5000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_val(&expr, 1.0);
}
