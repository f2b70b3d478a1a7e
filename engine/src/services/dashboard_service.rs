//! Orchestration between the environment (file uploads, filter controls)
//! and the core: file-kind classification, dataset loading, and full
//! snapshot recomputation on every filter change.

use std::path::Path;

use serde::Serialize;

use crate::aggregates::{city, filter, funnel, kpi, models, options, trend};
use crate::config::settings::EngineSettings;
use crate::data::csv_parser::{CsvNormalizer, ParseDiagnostics, ParseOutcome};
use crate::data::dataset_store::DatasetStore;
use crate::error::EngineError;
use shared::filter::FilterSelection;
use shared::models::{
    CityAmount, Dataset, DatePoint, FilterOptions, FunnelStage, KpiSummary, ModelCount, Record,
    SourceKind,
};

/// Result of one successful file load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub kind: SourceKind,
    pub records_loaded: usize,
    pub diagnostics: ParseDiagnostics,
    /// Store generation after the replacement; lets callers discard results
    /// derived from an earlier load that finished late.
    pub generation: u64,
}

/// Everything a presentation layer renders, recomputed in full for a given
/// filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub financing_trend: Vec<DatePoint>,
    pub sales_by_city: Vec<CityAmount>,
    pub top_models: Vec<ModelCount>,
    pub funnel_stages: Vec<FunnelStage>,
    pub filter_options: FilterOptions,
    pub filtered_sales: Vec<Record>,
    pub filtered_funnel: Vec<Record>,
}

pub struct DashboardService {
    store: DatasetStore,
    settings: EngineSettings,
}

impl DashboardService {
    pub fn new(settings: EngineSettings) -> Self {
        DashboardService {
            store: DatasetStore::new(),
            settings,
        }
    }

    /// Derives the dataset kind from the upload's filename, accepting both
    /// funnel spellings seen in the wild.
    pub fn classify_file(file_name: &str) -> Result<SourceKind, EngineError> {
        if file_name.contains("Sales_Dump") {
            Ok(SourceKind::Sales)
        } else if file_name.contains("SalesFunnel") || file_name.contains("Sales_Funnel") {
            Ok(SourceKind::Funnel)
        } else {
            Err(EngineError::UnrecognizedFile(file_name.to_string()))
        }
    }

    /// Parses raw CSV text and replaces the matching dataset. The previous
    /// dataset stays untouched until the full parse has completed, so a
    /// failure never leaves a half-populated store.
    pub fn load_file(&mut self, file_name: &str, raw_text: &str) -> Result<LoadSummary, EngineError> {
        let kind = Self::classify_file(file_name)?;
        let ParseOutcome {
            columns,
            records,
            diagnostics,
        } = CsvNormalizer::parse(raw_text);

        let dataset = Dataset::new(kind, columns, records);
        let records_loaded = dataset.len();
        let generation = self.store.replace(dataset);

        tracing::info!(
            file = %file_name,
            kind = ?kind,
            records = records_loaded,
            rows_skipped = diagnostics.rows_skipped,
            date_failures = diagnostics.date_failures,
            "data file loaded"
        );

        Ok(LoadSummary {
            kind,
            records_loaded,
            diagnostics,
            generation,
        })
    }

    /// Reads the file from disk and loads it, classifying by its filename.
    pub fn load_path(&mut self, path: &Path) -> Result<LoadSummary, EngineError> {
        let raw_text = std::fs::read_to_string(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        self.load_file(file_name, &raw_text)
    }

    pub fn dataset(&self, kind: SourceKind) -> Option<&Dataset> {
        self.store.get(kind)
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// Recomputes the filtered subsets and every derived series. Well
    /// defined with any combination of loaded/missing datasets.
    pub fn snapshot(&self, selection: &FilterSelection) -> DashboardSnapshot {
        let filtered_sales = self
            .store
            .get(SourceKind::Sales)
            .map(|dataset| filter::apply_sales(dataset, selection))
            .unwrap_or_default();
        let filtered_funnel = self
            .store
            .get(SourceKind::Funnel)
            .map(|dataset| filter::apply_funnel(dataset, selection))
            .unwrap_or_default();

        DashboardSnapshot {
            kpis: kpi::summarize(&filtered_sales, &filtered_funnel),
            financing_trend: trend::by_date(&filtered_sales),
            sales_by_city: city::by_city(&filtered_sales, self.settings.top_cities),
            top_models: models::top_models(&filtered_sales, self.settings.top_models),
            funnel_stages: funnel::stage_totals(&filtered_funnel),
            filter_options: self
                .store
                .get(SourceKind::Sales)
                .map(options::filter_options)
                .unwrap_or_default(),
            filtered_sales,
            filtered_funnel,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::filter::DateRange;
    use std::io::Write;

    const SALES_CSV: &str = "\
Financed_Date,City,Financer,Channel_Name,Channel_Code,Purchased_Model_Name,Principal_Amount,Device_Category,TradeIn,Careplus_Price
2024-01-05,Manila,BankCo,Store One,101,Galaxy S24,10000,Phone,0,0
2024-01-20,Cebu,LendCo,Store Two,102,Galaxy A15,20000,Tablet,5000,2000
2024-01-20,Manila,BankCo,Store One,101,Galaxy S24,30000,Phone,0,0";

    const FUNNEL_CSV: &str = "\
Channel_Name,Channel_Code,Purchases_Started,Info_Submitted,Offer_Seen,Offer_Selected,KYC_Completed,Agreement_Signed,Completed_Purchases
Store One,101,100,80,60,40,30,20,10
Store Two,102,50,40,30,20,10,5,2";

    fn loaded_service() -> DashboardService {
        let mut service = DashboardService::default();
        service
            .load_file("Daily_Sales_Dump.csv", SALES_CSV)
            .unwrap();
        service
            .load_file("Daily_SalesFunnel.csv", FUNNEL_CSV)
            .unwrap();
        service
    }

    #[test]
    fn classifies_by_filename_substring() {
        assert_eq!(
            DashboardService::classify_file("Daily_Sales_Dump.csv").unwrap(),
            SourceKind::Sales
        );
        assert_eq!(
            DashboardService::classify_file("Daily_SalesFunnel.csv").unwrap(),
            SourceKind::Funnel
        );
        assert_eq!(
            DashboardService::classify_file("Daily_Sales_Funnel.csv").unwrap(),
            SourceKind::Funnel
        );
        assert!(matches!(
            DashboardService::classify_file("notes.txt"),
            Err(EngineError::UnrecognizedFile(_))
        ));
    }

    #[test]
    fn load_file_populates_the_matching_dataset() {
        let service = loaded_service();
        assert_eq!(service.dataset(SourceKind::Sales).unwrap().len(), 3);
        assert_eq!(service.dataset(SourceKind::Funnel).unwrap().len(), 2);
    }

    #[test]
    fn unrecognized_file_leaves_the_store_untouched() {
        let mut service = loaded_service();
        let generation = service.generation();

        let result = service.load_file("random.csv", SALES_CSV);
        assert!(result.is_err());
        assert_eq!(service.generation(), generation);
        assert_eq!(service.dataset(SourceKind::Sales).unwrap().len(), 3);
    }

    #[test]
    fn reupload_replaces_wholesale_and_bumps_generation() {
        let mut service = loaded_service();
        let before = service.generation();

        let summary = service
            .load_file("Daily_Sales_Dump.csv", "Financed_Date,City\n2024-03-01,Davao")
            .unwrap();
        assert!(summary.generation > before);
        assert_eq!(service.dataset(SourceKind::Sales).unwrap().len(), 1);
    }

    #[test]
    fn load_path_reads_from_disk() {
        let mut file = tempfile::Builder::new()
            .prefix("Daily_Sales_Dump")
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(file, "{SALES_CSV}").unwrap();
        file.flush().unwrap();

        let mut service = DashboardService::default();
        let summary = service.load_path(file.path()).unwrap();
        assert_eq!(summary.kind, SourceKind::Sales);
        assert_eq!(summary.records_loaded, 3);
    }

    #[test]
    fn load_path_propagates_io_errors() {
        let mut service = DashboardService::default();
        let result = service.load_path(Path::new("no_such_Daily_Sales_Dump.csv"));
        assert!(matches!(result, Err(EngineError::Io { .. })));
    }

    #[test]
    fn snapshot_recomputes_everything_for_a_selection() {
        let service = loaded_service();
        let selection = FilterSelection {
            store: Some("Store One".into()),
            ..FilterSelection::default()
        };
        let snapshot = service.snapshot(&selection);

        assert_eq!(snapshot.filtered_sales.len(), 2);
        assert_eq!(snapshot.filtered_funnel.len(), 1);
        assert_eq!(snapshot.kpis.total_applications, 2);
        assert_eq!(snapshot.kpis.total_amount_financed, 40000.0);
        assert_eq!(snapshot.funnel_stages[0].total, 100.0);
        // Options always come from the full sales dataset, not the subset.
        assert_eq!(snapshot.filter_options.stores, vec!["Store One", "Store Two"]);
    }

    #[test]
    fn snapshot_with_date_range_narrows_the_trend() {
        let service = loaded_service();
        let selection = FilterSelection {
            date_range: Some(DateRange {
                start: "2024-01-10".into(),
                end: "2024-01-31".into(),
            }),
            ..FilterSelection::default()
        };
        let snapshot = service.snapshot(&selection);
        assert_eq!(
            snapshot.financing_trend,
            vec![DatePoint { date: "2024-01-20".into(), count: 2 }]
        );
    }

    #[test]
    fn snapshot_of_an_empty_service_is_well_defined() {
        let service = DashboardService::default();
        let snapshot = service.snapshot(&FilterSelection::default());

        assert!(snapshot.filtered_sales.is_empty());
        assert_eq!(snapshot.kpis, KpiSummary::default());
        assert!(snapshot.financing_trend.is_empty());
        assert!(snapshot.sales_by_city.is_empty());
        assert_eq!(snapshot.funnel_stages.len(), 7);
        assert!(snapshot.funnel_stages.iter().all(|s| s.total == 0.0));
        assert_eq!(snapshot.filter_options, FilterOptions::default());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let service = loaded_service();
        let snapshot = service.snapshot(&FilterSelection::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("kpis").is_some());
        assert_eq!(
            json["funnel_stages"].as_array().map(|stages| stages.len()),
            Some(7)
        );
    }
}
