//! Расчёт выручки и комиссии площадки
//!
//! Чистые функции без доступа к хранилищу. Все денежные значения
//! округляются до 2 знаков в момент вычисления, а не при отображении,
//! чтобы сохранённые commission/net точно сходились с gross при суммировании.

use serde::{Deserialize, Serialize};

/// Результат расчёта по одному периоду продаж
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub gross: f64,
    pub commission: f64,
    pub net: f64,
}

/// Округление до минорной единицы валюты (2 знака)
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Выручка из количества и цены за единицу
///
/// gross = quantity × unit_price, commission = gross × rate / 100,
/// net = gross − commission.
pub fn compute_revenue(quantity: i32, unit_price: f64, commission_rate: f64) -> RevenueBreakdown {
    let gross = round_money(quantity as f64 * unit_price);
    compute_from_gross(gross, commission_rate)
}

/// Выручка из вручную указанного gross (quantity здесь не участвует)
pub fn compute_from_gross(gross: f64, commission_rate: f64) -> RevenueBreakdown {
    let gross = round_money(gross);
    let commission = round_money(gross * commission_rate / 100.0);
    let net = round_money(gross - commission);
    RevenueBreakdown {
        gross,
        commission,
        net,
    }
}

/// Доля части от целого в процентах; 0 при нулевом знаменателе
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round_money(part / total * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_etsy_example() {
        // 3 единицы по 20.00 на площадке с комиссией 6.5%
        let result = compute_revenue(3, 20.0, 6.5);
        assert!((result.gross - 60.0).abs() < EPS);
        assert!((result.commission - 3.9).abs() < EPS);
        assert!((result.net - 56.1).abs() < EPS);
    }

    #[test]
    fn test_zero_rate_keeps_gross() {
        let result = compute_revenue(5, 9.99, 0.0);
        assert!((result.commission - 0.0).abs() < EPS);
        assert!((result.net - result.gross).abs() < EPS);
    }

    #[test]
    fn test_full_rate_zeroes_net() {
        let result = compute_revenue(2, 15.0, 100.0);
        assert!((result.commission - result.gross).abs() < EPS);
        assert!(result.net.abs() < EPS);
    }

    #[test]
    fn test_gross_reconciles_with_commission_plus_net() {
        // commission и net округлены одним правилом, дрейфа быть не должно
        for (qty, price, rate) in [
            (1, 0.01, 3.3),
            (3, 19.99, 6.5),
            (7, 4.55, 12.12),
            (100, 0.99, 50.0),
            (13, 33.33, 99.9),
        ] {
            let r = compute_revenue(qty, price, rate);
            assert!(
                (r.gross - r.commission - r.net).abs() < EPS,
                "drift for qty={} price={} rate={}",
                qty,
                price,
                rate
            );
        }
    }

    #[test]
    fn test_manual_gross_override_ignores_quantity() {
        let manual = compute_from_gross(60.0, 6.5);
        let derived = compute_revenue(3, 20.0, 6.5);
        assert_eq!(manual, derived);
    }

    #[test]
    fn test_zero_quantity_is_zero_everything() {
        let result = compute_revenue(0, 25.0, 10.0);
        assert!(result.gross.abs() < EPS);
        assert!(result.commission.abs() < EPS);
        assert!(result.net.abs() < EPS);
    }

    #[test]
    fn test_rounding_happens_per_derived_value() {
        // 19.99 * 6.5% = 1.29935 -> 1.30 уже на этапе расчёта комиссии
        let result = compute_from_gross(19.99, 6.5);
        assert!((result.commission - 1.30).abs() < EPS);
        assert!((result.net - 18.69).abs() < EPS);
    }

    #[test]
    fn test_percentage_of_guards_zero_denominator() {
        assert_eq!(percentage_of(10.0, 0.0), 0.0);
        assert!((percentage_of(42.0, 100.0) - 42.0).abs() < EPS);
    }
}
