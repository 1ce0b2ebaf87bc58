//! Curated exact-match table for common auto-insurance fields.

use fieldmap_model::BusinessGroup as G;
use fieldmap_model::DataKind as K;

use crate::store::{MappingSource, StoredMapping};

pub const SEED_DOMAIN: &str = "seed";

#[rustfmt::skip]
const SEED: &[(&str, &str, G, K)] = &[
    // policy identifiers
    ("保单号", "policy_number", G::Policy, K::String),
    ("保险单号", "policy_number", G::Policy, K::String),
    ("批单号", "endorsement_number", G::Policy, K::String),
    ("投保单号", "application_number", G::Policy, K::String),

    // premiums
    ("保费", "premium", G::Finance, K::Number),
    ("签单保费", "written_premium", G::Finance, K::Number),
    ("商业险保费", "commercial_premium", G::Finance, K::Number),
    ("交强险保费", "compulsory_premium", G::Finance, K::Number),
    ("批改保费", "endorsement_premium", G::Finance, K::Number),
    ("退保保费", "refund_premium", G::Finance, K::Number),
    ("实收保费", "earned_premium", G::Finance, K::Number),
    ("NCD保费", "ncd_premium", G::Finance, K::Number),
    ("NCD基准保费", "ncd_base_premium", G::Finance, K::Number),

    // claims
    ("赔款", "claim_amount", G::Finance, K::Number),
    ("总赔款", "total_claims", G::Finance, K::Number),
    ("案均赔款", "average_claim", G::Finance, K::Number),
    ("已决赔款", "paid_claims", G::Finance, K::Number),
    ("未决赔款", "outstanding_claims", G::Finance, K::Number),
    ("案件数", "claim_count", G::Finance, K::Number),
    ("出险次数", "claim_frequency", G::Finance, K::Number),
    ("出险频度", "claim_frequency", G::Finance, K::Number),

    // fees
    ("手续费", "commission", G::Finance, K::Number),
    ("佣金", "commission", G::Finance, K::Number),
    ("费用", "fee", G::Finance, K::Number),
    ("总费用", "total_fee", G::Finance, K::Number),
    ("费用金额", "fee_amount", G::Finance, K::Number),
    ("管理费", "admin_fee", G::Finance, K::Number),

    // ratios
    ("费用率", "expense_ratio", G::Finance, K::Number),
    ("赔付率", "loss_ratio", G::Finance, K::Number),
    ("综合成本率", "combined_ratio", G::Finance, K::Number),
    ("变动成本率", "variable_cost_ratio", G::Finance, K::Number),
    ("佣金率", "commission_rate", G::Finance, K::Number),
    ("折扣率", "discount_rate", G::Finance, K::Number),
    ("费率", "rate", G::Finance, K::Number),

    // coefficients and discounts
    ("NCD系数", "ncd_factor", G::Finance, K::Number),
    ("自主系数", "autonomous_factor", G::Finance, K::Number),
    ("渠道系数", "channel_factor", G::Finance, K::Number),
    ("折扣", "discount", G::Finance, K::Number),
    ("优惠金额", "discount_amount", G::Finance, K::Number),

    // organization
    ("机构", "organization", G::Organization, K::String),
    ("三级机构", "level_3_organization", G::Organization, K::String),
    ("四级机构", "level_4_organization", G::Organization, K::String),
    ("五级机构", "level_5_organization", G::Organization, K::String),
    ("支公司", "branch", G::Organization, K::String),
    ("分公司", "division", G::Organization, K::String),
    ("中心支公司", "central_branch", G::Organization, K::String),
    ("营业部", "sales_office", G::Organization, K::String),

    // agents and channels
    ("业务员", "agent", G::Organization, K::String),
    ("代理人", "agent", G::Organization, K::String),
    ("经纪人", "broker", G::Organization, K::String),
    ("渠道", "channel", G::Organization, K::String),
    ("销售渠道", "sales_channel", G::Organization, K::String),
    ("终端来源", "terminal_source", G::Organization, K::String),

    // vehicle identity
    ("车牌号", "license_plate", G::Vehicle, K::String),
    ("车牌号码", "license_plate", G::Vehicle, K::String),
    ("车架号", "vin", G::Vehicle, K::String),
    ("发动机号", "engine_number", G::Vehicle, K::String),
    ("车型", "vehicle_model", G::Vehicle, K::String),
    ("厂牌型号", "make_model", G::Vehicle, K::String),
    ("品牌", "brand", G::Vehicle, K::String),
    ("车辆种类", "vehicle_type", G::Vehicle, K::String),
    ("使用性质", "use_nature", G::Vehicle, K::String),

    // vehicle attributes
    ("新旧车", "vehicle_age_category", G::Vehicle, K::String),
    ("车龄", "vehicle_age", G::Vehicle, K::Number),
    ("座位数", "seat_count", G::Vehicle, K::Number),
    ("吨位", "tonnage", G::Vehicle, K::Number),
    ("排量", "displacement", G::Vehicle, K::Number),
    ("功率", "power", G::Vehicle, K::Number),
    ("整备质量", "curb_weight", G::Vehicle, K::Number),
    ("购置价", "purchase_price", G::Vehicle, K::Number),
    ("新车购置价", "new_vehicle_price", G::Vehicle, K::Number),

    // product and coverage
    ("险种", "coverage_type", G::Product, K::String),
    ("险别", "coverage", G::Product, K::String),
    ("险类", "insurance_class", G::Product, K::String),
    ("产品", "product", G::Product, K::String),
    ("产品名称", "product_name", G::Product, K::String),
    ("保额", "coverage_amount", G::Product, K::Number),
    ("保险金额", "insured_amount", G::Product, K::Number),
    ("限额", "limit", G::Product, K::Number),

    // customer
    ("投保人", "policyholder", G::Customer, K::String),
    ("被保险人", "insured", G::Customer, K::String),
    ("客户名称", "customer_name", G::Customer, K::String),
    ("客户类型", "customer_type", G::Customer, K::String),
    ("证件号码", "id_number", G::Customer, K::String),
    ("证件类型", "id_type", G::Customer, K::String),
    ("联系电话", "phone", G::Customer, K::String),
    ("地址", "address", G::Customer, K::String),

    // dates and times
    ("保险起期", "policy_start_date", G::Time, K::Datetime),
    ("保险止期", "policy_end_date", G::Time, K::Datetime),
    ("生效日期", "effective_date", G::Time, K::Datetime),
    ("到期日期", "expiration_date", G::Time, K::Datetime),
    ("确认时间", "confirmation_time", G::Time, K::Datetime),
    ("投保确认时间", "application_confirmation_time", G::Time, K::Datetime),
    ("签单时间", "issuance_time", G::Time, K::Datetime),
    ("批改时间", "endorsement_time", G::Time, K::Datetime),
    ("退保时间", "cancellation_time", G::Time, K::Datetime),
    ("出险时间", "claim_time", G::Time, K::Datetime),
    ("报案时间", "report_time", G::Time, K::Datetime),
    ("刷新时间", "refresh_time", G::Time, K::Datetime),

    // flags
    ("是否续保", "is_renewal", G::Flag, K::Boolean),
    ("是否新能源", "is_new_energy", G::Flag, K::Boolean),
    ("是否过户车", "is_transferred", G::Flag, K::Boolean),
    ("是否网约车", "is_ride_hailing", G::Flag, K::Boolean),
    ("是否营业", "is_commercial", G::Flag, K::Boolean),
    ("续保标识", "renewal_flag", G::Flag, K::Boolean),
    ("转保标识", "conversion_flag", G::Flag, K::Boolean),

    // status
    ("保单状态", "policy_status", G::General, K::String),
    ("业务状态", "business_status", G::General, K::String),
    ("承保状态", "underwriting_status", G::General, K::String),
    ("理赔状态", "claim_status", G::General, K::String),

    // scores
    ("评分", "score", G::General, K::Number),
    ("风险评分", "risk_score", G::General, K::Number),
    ("等级", "level", G::General, K::String),
    ("风险等级", "risk_level", G::General, K::String),
];

impl MappingSource {
    /// Built-in dictionary, loaded before any directory source so that files
    /// on disk can override it.
    pub fn seed() -> Self {
        let mut source = MappingSource::new(SEED_DOMAIN, "built-in auto-insurance field names");
        for (name, en_name, group, dtype) in SEED {
            source.mappings.insert(
                (*name).to_string(),
                StoredMapping {
                    en_name: (*en_name).to_string(),
                    group: *group,
                    dtype: *dtype,
                    description: format!("{name} (curated)"),
                },
            );
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_model::NamingConvention;

    #[test]
    fn seed_names_follow_the_naming_convention() {
        let naming = NamingConvention::default();
        for (name, en_name, _, _) in SEED {
            assert_eq!(naming.check(en_name), None, "{name} -> {en_name}");
        }
    }

    #[test]
    fn seed_keys_are_unique() {
        assert_eq!(MappingSource::seed().len(), SEED.len());
    }
}
