use super::datasets::{ChartDataset, ChartKind};

/// Port to the charting display. Each call replaces the chart's data wholesale.
pub trait ChartSurface: Send {
    fn update_chart(&mut self, kind: ChartKind, dataset: ChartDataset);
}
