pub mod report;
pub mod report_range;
pub mod store_records;

pub use report::{
    ChartSlice, CustomerTypeBreakdown, PopularService, RecentOrderSummary, RecentOrdersPage,
    RevenuePoint, SalesSummary, NO_LINKED_SERVICES, NO_POPULAR_SERVICE, UNKNOWN_SERVICE,
    UNNAMED_CUSTOMER,
};
pub use report_range::{ReportRange, SeriesOrder, WindowStyle};
pub use store_records::{
    PaymentPoint, RecentOrderRecord, ServiceRecord, ServiceUsage, VehicleOrderCount,
    ORDER_STATUS_CANCELLED, PAYMENT_STATUS_COMPLETED,
};
