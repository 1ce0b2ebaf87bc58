//! Built-in auto-insurance vocabulary.

use std::collections::BTreeMap;

use crate::enums::{BusinessGroup, DataKind};
use crate::naming::NamingConvention;
use crate::rules::{KeywordSets, PatternRule, RuleClass, RuleSet, Trigger};

pub const BUILTIN_VERSION: &str = "2024.1";

pub(crate) fn builtin_rule_set() -> RuleSet {
    RuleSet {
        version: BUILTIN_VERSION.to_string(),
        naming: NamingConvention::default(),
        rules: pattern_rules(),
        phrases: phrase_dictionary(),
        keywords: keyword_sets(),
        expected_tokens: expected_tokens(),
        group_vocabulary: group_vocabulary(),
        boolean_tokens: strings(&[
            "是", "否", "y", "n", "yes", "no", "true", "false", "0", "1", "t", "f",
        ]),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn rule(
    trigger: Trigger,
    priority: i32,
    group: BusinessGroup,
    kind: DataKind,
    token: Option<&str>,
) -> PatternRule {
    PatternRule {
        trigger,
        priority,
        classification: RuleClass {
            group,
            kind,
            token: token.map(str::to_string),
        },
    }
}

fn prefix(value: &str) -> Trigger {
    Trigger::Prefix(value.to_string())
}

fn suffix(value: &str) -> Trigger {
    Trigger::Suffix(value.to_string())
}

fn contains(value: &str) -> Trigger {
    Trigger::Contains(value.to_string())
}

fn any_of(values: &[&str]) -> Trigger {
    Trigger::AnyOf(strings(values))
}

fn regex(pattern: &str) -> Trigger {
    Trigger::Regex(pattern.to_string())
}

// Compound phrases sit one point above the generic suffix they contain.
fn pattern_rules() -> Vec<PatternRule> {
    use BusinessGroup as G;
    use DataKind as K;

    vec![
        // time
        rule(suffix("起期"), 90, G::Time, K::Datetime, None),
        rule(suffix("止期"), 90, G::Time, K::Datetime, None),
        rule(contains("生效日"), 90, G::Time, K::Datetime, Some("effective_date")),
        rule(contains("到期日"), 90, G::Time, K::Datetime, Some("expiration_date")),
        rule(
            regex("(投保|签单|批改|退保|报案|出险)时间"),
            86,
            G::Time,
            K::Datetime,
            None,
        ),
        rule(contains("确认时间"), 85, G::Time, K::Datetime, Some("confirmation_time")),
        rule(suffix("时间"), 80, G::Time, K::Datetime, None),
        rule(suffix("日期"), 80, G::Time, K::Datetime, None),
        // premiums and claims
        rule(
            regex("(签单|商业险|交强险|批改|退保|实收)保费"),
            86,
            G::Finance,
            K::Number,
            None,
        ),
        rule(suffix("保费"), 85, G::Finance, K::Number, None),
        rule(regex("(总|案均|已决|未决)赔款"), 86, G::Finance, K::Number, None),
        rule(suffix("赔款"), 85, G::Finance, K::Number, None),
        rule(regex("(出险|索赔)次数"), 85, G::Finance, K::Number, Some("claim_count")),
        rule(
            regex("(出险|索赔)频度"),
            85,
            G::Finance,
            K::Number,
            Some("claim_frequency"),
        ),
        // fees, ratios, coefficients
        rule(any_of(&["手续费", "佣金"]), 80, G::Finance, K::Number, Some("commission")),
        rule(regex("费用(金额)?$"), 80, G::Finance, K::Number, Some("fee")),
        rule(regex("(管理|服务)费"), 80, G::Finance, K::Number, None),
        rule(
            regex("(费用|赔付|综合成本|变动成本)率"),
            80,
            G::Finance,
            K::Number,
            None,
        ),
        rule(any_of(&["比率", "比例"]), 75, G::Finance, K::Number, Some("ratio")),
        rule(regex("(NCD|自主|渠道)系数"), 80, G::Finance, K::Number, None),
        rule(contains("折扣"), 75, G::Finance, K::Number, Some("discount")),
        rule(suffix("金额"), 70, G::Finance, K::Number, None),
        rule(contains("价格"), 70, G::Finance, K::Number, Some("price")),
        // policy identifiers
        rule(regex("(保单|批单|投保单)号"), 85, G::Policy, K::String, None),
        // organization
        rule(regex("[三四五]级机构"), 75, G::Organization, K::String, None),
        rule(regex("(支|分)公司"), 75, G::Organization, K::String, None),
        rule(any_of(&["营业部", "中心"]), 70, G::Organization, K::String, None),
        rule(regex("业务员|代理人?|经纪人?"), 75, G::Organization, K::String, None),
        rule(contains("渠道"), 70, G::Organization, K::String, Some("channel")),
        // vehicle
        rule(regex("车牌(号码?)?"), 90, G::Vehicle, K::String, Some("license_plate")),
        rule(
            regex("车架号|(^|[^A-Za-z])VIN([^A-Za-z]|$)"),
            90,
            G::Vehicle,
            K::String,
            Some("vin"),
        ),
        rule(contains("发动机号"), 85, G::Vehicle, K::String, Some("engine_number")),
        rule(
            any_of(&["车型", "厂牌型号"]),
            75,
            G::Vehicle,
            K::String,
            Some("vehicle_model"),
        ),
        rule(contains("品牌"), 70, G::Vehicle, K::String, Some("brand")),
        rule(
            contains("新旧车"),
            75,
            G::Vehicle,
            K::String,
            Some("vehicle_age_category"),
        ),
        rule(contains("车龄"), 75, G::Vehicle, K::Number, Some("vehicle_age")),
        rule(
            any_of(&["座位数", "吨位", "排量", "功率"]),
            70,
            G::Vehicle,
            K::Number,
            None,
        ),
        // product
        rule(any_of(&["险种", "险别", "险类"]), 80, G::Product, K::String, None),
        rule(regex("产品(名称)?"), 75, G::Product, K::String, Some("product")),
        rule(
            any_of(&["保额", "保险金额", "限额"]),
            75,
            G::Product,
            K::Number,
            None,
        ),
        // customer
        rule(any_of(&["投保人", "被保险人"]), 80, G::Customer, K::String, None),
        rule(regex("客户(名称|类型)?"), 75, G::Customer, K::String, None),
        rule(regex("证件(号码|类型)"), 75, G::Customer, K::String, None),
        rule(any_of(&["联系电话", "电话"]), 70, G::Customer, K::String, Some("phone")),
        rule(contains("地址"), 70, G::Customer, K::String, Some("address")),
        // flags
        rule(prefix("是否"), 85, G::Flag, K::Boolean, None),
        rule(regex("(标识|标志)$"), 75, G::Flag, K::Boolean, None),
        // status, score, level
        rule(regex("(保单|业务|承保|理赔)状态"), 75, G::General, K::String, None),
        rule(suffix("状态"), 65, G::General, K::String, None),
        rule(suffix("评分"), 70, G::General, K::Number, None),
        rule(suffix("等级"), 70, G::General, K::String, None),
        // generic tails
        rule(regex("(类型|种类)$"), 60, G::General, K::String, None),
        rule(regex("(编号|号)$"), 60, G::General, K::String, Some("number")),
        rule(suffix("名称"), 55, G::General, K::String, None),
    ]
}

fn phrase_dictionary() -> BTreeMap<String, String> {
    let pairs: &[(&str, &str)] = &[
        // identifiers
        ("保单号", "policy_number"),
        ("批单号", "endorsement_number"),
        ("投保单号", "application_number"),
        ("单号", "number"),
        ("编号", "code"),
        // premium
        ("签单保费", "written_premium"),
        ("商业险保费", "commercial_premium"),
        ("交强险保费", "compulsory_premium"),
        ("保费", "premium"),
        // claims
        ("赔款", "claim"),
        ("案均", "average"),
        ("总", "total"),
        ("已决", "paid"),
        ("未决", "outstanding"),
        ("出险", "claim"),
        ("索赔", "claim"),
        // fees
        ("手续费", "commission"),
        ("佣金", "commission"),
        ("费用", "fee"),
        ("管理费", "admin_fee"),
        // ratios
        ("费用率", "expense_ratio"),
        ("赔付率", "loss_ratio"),
        ("成本率", "cost_ratio"),
        ("综合", "combined"),
        ("变动", "variable"),
        ("率", "ratio"),
        ("比率", "ratio"),
        ("比例", "ratio"),
        // coefficients
        ("NCD系数", "ncd_factor"),
        ("NCD", "ncd"),
        ("系数", "factor"),
        ("折扣", "discount"),
        ("优惠", "discount"),
        // organization
        ("三级机构", "level_3_organization"),
        ("四级机构", "level_4_organization"),
        ("五级机构", "level_5_organization"),
        ("机构", "organization"),
        ("支公司", "branch"),
        ("分公司", "division"),
        ("营业部", "sales_office"),
        ("中心", "center"),
        ("业务员", "agent"),
        ("代理人", "agent"),
        ("代理", "agent"),
        ("经纪人", "broker"),
        ("经纪", "broker"),
        ("渠道", "channel"),
        ("销售", "sales"),
        ("终端", "terminal"),
        ("来源", "source"),
        // vehicle
        ("车牌", "license_plate"),
        ("车架号", "vin"),
        ("发动机号", "engine_number"),
        ("车型", "vehicle_model"),
        ("厂牌", "make"),
        ("型号", "model"),
        ("品牌", "brand"),
        ("新旧车", "vehicle_age_category"),
        ("车龄", "vehicle_age"),
        ("座位数", "seat_count"),
        ("吨位", "tonnage"),
        ("排量", "displacement"),
        ("功率", "power"),
        ("整备质量", "curb_weight"),
        ("购置价", "purchase_price"),
        ("新车", "new_vehicle"),
        ("车辆", "vehicle"),
        ("车", "vehicle"),
        // product
        ("险种", "coverage_type"),
        ("险别", "coverage"),
        ("险类", "insurance_class"),
        ("商业险", "commercial"),
        ("交强险", "compulsory"),
        ("产品", "product"),
        ("保额", "coverage_amount"),
        ("保险金额", "insured_amount"),
        ("金额", "amount"),
        ("限额", "limit"),
        // customer
        ("投保人", "policyholder"),
        ("被保险人", "insured"),
        ("客户", "customer"),
        ("证件号", "id_number"),
        ("证件", "id"),
        ("电话", "phone"),
        ("地址", "address"),
        ("满意度", "satisfaction"),
        // time
        ("保险起期", "policy_start_date"),
        ("保险止期", "policy_end_date"),
        ("起期", "start_date"),
        ("止期", "end_date"),
        ("生效日期", "effective_date"),
        ("到期日期", "expiration_date"),
        ("确认时间", "confirmation_time"),
        ("投保时间", "application_time"),
        ("签单时间", "issuance_time"),
        ("批改时间", "endorsement_time"),
        ("退保时间", "cancellation_time"),
        ("报案时间", "report_time"),
        ("刷新时间", "refresh_time"),
        ("时间", "time"),
        ("日期", "date"),
        ("投保", "application"),
        ("签单", "issuance"),
        ("批改", "endorsement"),
        ("退保", "cancellation"),
        ("报案", "report"),
        ("刷新", "refresh"),
        ("确认", "confirmation"),
        // flags
        ("是否", "is"),
        ("续保", "renewal"),
        ("转保", "conversion"),
        ("新能源", "new_energy"),
        ("过户", "transferred"),
        ("网约车", "ride_hailing"),
        ("营业", "commercial"),
        ("标识", "flag"),
        ("标志", "flag"),
        ("预警", "warning"),
        // status
        ("状态", "status"),
        ("保单", "policy"),
        ("业务", "business"),
        ("承保", "underwriting"),
        ("理赔", "claim"),
        // general
        ("评分", "score"),
        ("等级", "level"),
        ("风险", "risk"),
        ("类型", "type"),
        ("种类", "category"),
        ("名称", "name"),
        ("次数", "count"),
        ("频度", "frequency"),
        ("数量", "quantity"),
        ("笔数", "count"),
    ];
    pairs
        .iter()
        .map(|(phrase, token)| ((*phrase).to_string(), (*token).to_string()))
        .collect()
}

fn keyword_sets() -> KeywordSets {
    KeywordSets {
        quantity: strings(&[
            "金额", "保费", "费用", "赔款", "价格", "数量", "次数", "频度", "评分", "率", "系数",
            "折扣", "吨位", "座位", "排量", "功率", "车龄", "笔数", "比例", "件数", "保额", "限额",
        ]),
        rating: strings(&["评分", "等级", "分数", "级别", "系数", "排名"]),
        ratio: strings(&["比例", "比率", "折扣", "系数", "率", "优待"]),
        currency: strings(&["保费", "费用", "金额", "价格", "赔款", "手续费", "税"]),
        identifier: strings(&["保单号", "批单号", "证件号", "单号"]),
        datetime: strings(&["时间", "日期", "起期", "止期", "生效", "到期"]),
        boolean_prefixes: strings(&["是否"]),
    }
}

fn expected_tokens() -> BTreeMap<String, Vec<String>> {
    let pairs: &[(&str, &[&str])] = &[
        ("时间", &["time"]),
        ("日期", &["date"]),
        ("起期", &["start"]),
        ("止期", &["end"]),
        ("保费", &["premium"]),
        ("费用", &["fee", "expense"]),
        ("赔款", &["claim"]),
        ("机构", &["organization", "org"]),
        ("支公司", &["branch"]),
        ("险种", &["coverage"]),
        ("车牌", &["license_plate"]),
        ("客户", &["customer"]),
        ("保单", &["policy", "application"]),
        ("业务员", &["agent"]),
        ("是否", &["is"]),
        ("标识", &["flag"]),
        ("金额", &["amount"]),
        ("折扣", &["discount"]),
        ("系数", &["factor", "coefficient"]),
        ("确认", &["confirm"]),
        ("投保", &["application", "policyholder"]),
        ("被保险人", &["insured"]),
        ("投保人", &["policyholder", "applicant"]),
        ("证件号", &["id_number"]),
        ("年龄", &["age"]),
        ("性别", &["gender"]),
        ("车型", &["vehicle_model", "model"]),
        ("车架号", &["vin"]),
        ("发动机", &["engine"]),
        ("签单", &["issuance", "written"]),
        ("批改", &["endorsement"]),
        ("保额", &["coverage_amount", "insured_amount"]),
        ("手续费", &["commission"]),
        ("比例", &["ratio"]),
        ("座位", &["seat"]),
        ("吨位", &["tonnage"]),
        ("排量", &["displacement"]),
    ];
    pairs
        .iter()
        .map(|(phrase, tokens)| ((*phrase).to_string(), strings(tokens)))
        .collect()
}

fn group_vocabulary() -> BTreeMap<BusinessGroup, Vec<String>> {
    BTreeMap::from([
        (
            BusinessGroup::Time,
            strings(&["time", "date", "datetime", "start", "end"]),
        ),
        (
            BusinessGroup::Organization,
            strings(&[
                "organization",
                "org",
                "branch",
                "division",
                "center",
                "office",
                "agent",
                "broker",
                "channel",
                "terminal",
                "company",
                "sales",
            ]),
        ),
        (
            BusinessGroup::Finance,
            strings(&[
                "premium",
                "fee",
                "amount",
                "cost",
                "price",
                "commission",
                "discount",
                "tax",
                "ncd",
                "ratio",
                "rate",
                "factor",
                "claim",
                "claims",
                "expense",
                "loss",
            ]),
        ),
        (
            BusinessGroup::Product,
            strings(&["coverage", "product", "insurance", "insured", "limit", "class"]),
        ),
        (
            BusinessGroup::Vehicle,
            strings(&[
                "vehicle",
                "license",
                "plate",
                "vin",
                "engine",
                "model",
                "brand",
                "make",
                "seat",
                "tonnage",
                "displacement",
                "power",
                "weight",
                "purchase",
                "price",
                "nature",
                "use",
            ]),
        ),
        (
            BusinessGroup::Customer,
            strings(&[
                "customer",
                "policyholder",
                "insured",
                "id",
                "phone",
                "address",
                "owner",
                "applicant",
            ]),
        ),
        (
            BusinessGroup::Flag,
            strings(&["is", "has", "flag", "indicator"]),
        ),
        (
            BusinessGroup::Policy,
            strings(&["policy", "endorsement", "application", "number"]),
        ),
    ])
}
