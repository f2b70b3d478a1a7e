//! Column-name contract with the upstream CSV producers.
//!
//! The sales dump and funnel dump are exports from heterogeneous systems;
//! these are the names the engine recognizes. Column names are case- and
//! spelling-sensitive except where a synonym is listed explicitly.

pub const FINANCED_DATE: &str = "Financed_Date";
pub const PRINCIPAL_AMOUNT: &str = "Principal_Amount";
pub const CITY: &str = "City";
pub const FINANCER: &str = "Financer";
pub const CHANNEL_NAME: &str = "Channel_Name";
pub const STORE_NAME: &str = "Store_Name";
pub const CHANNEL_CODE: &str = "Channel_Code";
pub const PURCHASED_MODEL_NAME: &str = "Purchased_Model_Name";
pub const DEVICE_CATEGORY: &str = "Device_Category";
pub const TRADE_IN: &str = "TradeIn";
pub const CAREPLUS_PRICE: &str = "Careplus_Price";
pub const COMPLETED_PURCHASES: &str = "Completed_Purchases";

/// Accepted spellings for the date column, checked in order against the
/// header to locate it by position.
pub const DATE_COLUMN_SYNONYMS: [&str; 4] =
    ["Financed_Date", "financed_date", "FinancedDate", "Date"];

/// One step of the fixed purchase funnel: display name plus the column
/// holding its per-row count in the funnel dump.
#[derive(Debug, Clone, Copy)]
pub struct FunnelStageSpec {
    pub name: &'static str,
    pub column: &'static str,
}

/// The seven funnel stages, in pipeline order.
pub const FUNNEL_STAGES: [FunnelStageSpec; 7] = [
    FunnelStageSpec { name: "Purchases Started", column: "Purchases_Started" },
    FunnelStageSpec { name: "Info Submitted", column: "Info_Submitted" },
    FunnelStageSpec { name: "Offer Seen", column: "Offer_Seen" },
    FunnelStageSpec { name: "Offer Selected", column: "Offer_Selected" },
    FunnelStageSpec { name: "KYC Completed", column: "KYC_Completed" },
    FunnelStageSpec { name: "Agreement Signed", column: "Agreement_Signed" },
    FunnelStageSpec { name: "Completed Purchases", column: "Completed_Purchases" },
];
