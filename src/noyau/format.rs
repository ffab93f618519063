// src/noyau/format.rs
//
// Affichage d’une valeur f64 pour l’hôte.
// - entier exact (et pas trop grand) : sans partie décimale ("14", "-6")
// - sinon : `digits` décimales, zéros de queue retirés ("0.3333", "2.5")

/// Au-delà, un f64 entier s’affiche en notation scientifique.
const ENTIER_AFFICHABLE_MAX: f64 = 1e15;

pub fn format_valeur(v: f64, digits: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }

    if v.fract() == 0.0 && v.abs() < ENTIER_AFFICHABLE_MAX {
        // -0 s’affiche "0"
        return format!("{}", v + 0.0);
    }

    if v.abs() >= ENTIER_AFFICHABLE_MAX {
        return format!("{v:e}");
    }

    let s = format!("{v:.digits$}");
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}
