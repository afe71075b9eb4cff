//! Shared test utilities for drydock-db unit tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use drydock_core::entities::{ChecklistItemSeed, Repair};
    use drydock_core::requests::RepairCreate;

    use crate::IN_MEMORY;
    use crate::service::RepairService;

    /// Create an in-memory `RepairService`.
    pub async fn test_service() -> RepairService {
        RepairService::new_local(IN_MEMORY).await.unwrap()
    }

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Create a repair for `hull_id` opened on `date_opened`.
    pub async fn create_test_repair(
        svc: &RepairService,
        hull_id: &str,
        date_opened: NaiveDate,
    ) -> Repair {
        svc.create_repair(RepairCreate::new(hull_id, date_opened))
            .await
            .unwrap()
    }

    pub fn seed(code: &str, sort_order: i64, active: bool) -> ChecklistItemSeed {
        ChecklistItemSeed {
            code: code.into(),
            label: format!("{code} check"),
            sort_order,
            active,
        }
    }

    /// Seed a small catalog: `PRE`, `WIRING`, `SEA_TRIAL` active, `LEGACY` inactive.
    pub async fn seed_test_catalog(svc: &RepairService) {
        svc.seed_checklist_items(&[
            seed("SEA_TRIAL", 30, true),
            seed("PRE", 10, true),
            seed("WIRING", 20, true),
            seed("LEGACY", 5, false),
        ])
        .await
        .unwrap();
    }
}
