use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    upload_requests: AtomicU64,
    upload_rejected: AtomicU64,
    storage_errors: AtomicU64,
    lane_meters: AtomicU64,
}

impl Metrics {
    pub fn record_upload(&self, lane_count: usize) {
        self.upload_requests.fetch_add(1, Ordering::Relaxed);
        self.lane_meters
            .fetch_add(lane_count as u64, Ordering::Relaxed);
    }

    pub fn record_upload_rejected(&self) {
        self.upload_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.upload_requests.load(Ordering::Relaxed);
        let rejected = self.upload_rejected.load(Ordering::Relaxed);
        let errors = self.storage_errors.load(Ordering::Relaxed);
        let lanes = self.lane_meters.load(Ordering::Relaxed);

        format!(
            "# TYPE vendex_upload_requests_total counter\n\
vendex_upload_requests_total {}\n\
# TYPE vendex_upload_rejected_total counter\n\
vendex_upload_rejected_total {}\n\
# TYPE vendex_storage_errors_total counter\n\
vendex_storage_errors_total {}\n\
# TYPE vendex_lane_meters_total counter\n\
vendex_lane_meters_total {}\n",
            requests, rejected, errors, lanes
        )
    }
}
