//! Official Belastingdienst figures for the bundled tax years.
//!
//! Box 1 payroll brackets exclude the national insurance premium, which is
//! modelled separately on the first band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    AssumedReturnRates, Box1Config, Box3Config, Box3Thresholds, CreditSegment, RulingThresholds,
    TaxBracket, TaxYearConfig,
};

const NATIONAL_INSURANCE_RATE: Decimal = dec!(0.2765);
const HOLIDAY_ALLOWANCE_RATE: Decimal = dec!(0.08);
const RULING_TAX_FREE_RATE: Decimal = dec!(0.30);

fn brackets(bands: &[(Decimal, Option<Decimal>, Decimal)]) -> Vec<TaxBracket> {
    bands
        .iter()
        .map(|&(min_income, max_income, tax_rate)| TaxBracket {
            min_income,
            max_income,
            tax_rate,
        })
        .collect()
}

fn segments(parts: &[(Decimal, Option<Decimal>, Decimal, Decimal)]) -> Vec<CreditSegment> {
    parts
        .iter()
        .map(|&(min_income, max_income, base_amount, rate)| CreditSegment {
            min_income,
            max_income,
            base_amount,
            rate,
        })
        .collect()
}

pub(super) fn config_2023() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2023,
        box1: Box1Config {
            tax_year: 2023,
            payroll_brackets: brackets(&[
                (dec!(0), Some(dec!(37149)), dec!(0.0928)),
                (dec!(37149), Some(dec!(73031)), dec!(0.3693)),
                (dec!(73031), None, dec!(0.495)),
            ]),
            social_security_rate: NATIONAL_INSURANCE_RATE,
            social_security_ceiling: dec!(37149),
            general_credit: segments(&[
                (dec!(0), Some(dec!(22660)), dec!(3070), dec!(0)),
                (dec!(22660), Some(dec!(73031)), dec!(3070), dec!(-0.06095)),
                (dec!(73031), None, dec!(0), dec!(0)),
            ]),
            labour_credit: segments(&[
                (dec!(0), Some(dec!(10741)), dec!(0), dec!(0.08231)),
                (dec!(10741), Some(dec!(23201)), dec!(884), dec!(0.29861)),
                (dec!(23201), Some(dec!(37691)), dec!(4605), dec!(0.03085)),
                (dec!(37691), Some(dec!(115295)), dec!(5052), dec!(-0.0651)),
                (dec!(115295), None, dec!(0), dec!(0)),
            ]),
            holiday_allowance_rate: HOLIDAY_ALLOWANCE_RATE,
            ruling_tax_free_rate: RULING_TAX_FREE_RATE,
            ruling_thresholds: RulingThresholds {
                research_worker: dec!(0),
                young_professional: dec!(31891),
                other: dec!(41954),
            },
        },
        box3: Box3Config {
            tax_year: 2023,
            thresholds: Box3Thresholds {
                tax_free_assets_per_individual: dec!(57000),
                debts_threshold_per_individual: dec!(3400),
            },
            tax_rate: dec!(0.32),
            assumed_return_rates: AssumedReturnRates {
                bank_balance: dec!(0.0092),
                investment_assets: dec!(0.0617),
                debts: dec!(0.0246),
            },
        },
    }
}

pub(super) fn config_2024() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2024,
        box1: Box1Config {
            tax_year: 2024,
            payroll_brackets: brackets(&[
                (dec!(0), Some(dec!(38098)), dec!(0.0932)),
                (dec!(38098), Some(dec!(75518)), dec!(0.3697)),
                (dec!(75518), None, dec!(0.495)),
            ]),
            social_security_rate: NATIONAL_INSURANCE_RATE,
            social_security_ceiling: dec!(38098),
            general_credit: segments(&[
                (dec!(0), Some(dec!(24812)), dec!(3362), dec!(0)),
                (dec!(24812), Some(dec!(75518)), dec!(3362), dec!(-0.0663)),
                (dec!(75518), None, dec!(0), dec!(0)),
            ]),
            labour_credit: segments(&[
                (dec!(0), Some(dec!(11491)), dec!(0), dec!(0.08425)),
                (dec!(11491), Some(dec!(24821)), dec!(968), dec!(0.31433)),
                (dec!(24821), Some(dec!(39958)), dec!(5158), dec!(0.02471)),
                (dec!(39958), Some(dec!(124935)), dec!(5532), dec!(-0.0651)),
                (dec!(124935), None, dec!(0), dec!(0)),
            ]),
            holiday_allowance_rate: HOLIDAY_ALLOWANCE_RATE,
            ruling_tax_free_rate: RULING_TAX_FREE_RATE,
            ruling_thresholds: RulingThresholds {
                research_worker: dec!(0),
                young_professional: dec!(35048),
                other: dec!(46107),
            },
        },
        box3: Box3Config {
            tax_year: 2024,
            thresholds: Box3Thresholds {
                tax_free_assets_per_individual: dec!(57000),
                debts_threshold_per_individual: dec!(3700),
            },
            tax_rate: dec!(0.36),
            assumed_return_rates: AssumedReturnRates {
                bank_balance: dec!(0.0144),
                investment_assets: dec!(0.0604),
                debts: dec!(0.0261),
            },
        },
    }
}

pub(super) fn config_2025() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2025,
        box1: Box1Config {
            tax_year: 2025,
            payroll_brackets: brackets(&[
                (dec!(0), Some(dec!(38441)), dec!(0.0817)),
                (dec!(38441), Some(dec!(76817)), dec!(0.3748)),
                (dec!(76817), None, dec!(0.495)),
            ]),
            social_security_rate: NATIONAL_INSURANCE_RATE,
            social_security_ceiling: dec!(38441),
            general_credit: segments(&[
                (dec!(0), Some(dec!(28406)), dec!(3068), dec!(0)),
                (dec!(28406), Some(dec!(76817)), dec!(3068), dec!(-0.06337)),
                (dec!(76817), None, dec!(0), dec!(0)),
            ]),
            labour_credit: segments(&[
                (dec!(0), Some(dec!(12169)), dec!(0), dec!(0.08053)),
                (dec!(12169), Some(dec!(26288)), dec!(980), dec!(0.3003)),
                (dec!(26288), Some(dec!(43071)), dec!(5220), dec!(0.02258)),
                (dec!(43071), Some(dec!(129078)), dec!(5599), dec!(-0.0651)),
                (dec!(129078), None, dec!(0), dec!(0)),
            ]),
            holiday_allowance_rate: HOLIDAY_ALLOWANCE_RATE,
            ruling_tax_free_rate: RULING_TAX_FREE_RATE,
            ruling_thresholds: RulingThresholds {
                research_worker: dec!(0),
                young_professional: dec!(35468),
                other: dec!(46660),
            },
        },
        box3: Box3Config {
            tax_year: 2025,
            thresholds: Box3Thresholds {
                tax_free_assets_per_individual: dec!(57684),
                debts_threshold_per_individual: dec!(3800),
            },
            tax_rate: dec!(0.36),
            assumed_return_rates: AssumedReturnRates {
                bank_balance: dec!(0.0144),
                investment_assets: dec!(0.0588),
                debts: dec!(0.0262),
            },
        },
    }
}
