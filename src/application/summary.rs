use crate::domain::entities::operation::Operation;
use crate::domain::error::DomainError;
use crate::domain::ports::operation_repository::{OperationFilter, OperationRepository};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ProfitSummary {
    pub operations: usize,
    pub total_profit: f64,
    pub pairs: Vec<PairProfit>,
    /// Oldest-first cumulative profit, ready to plot.
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairProfit {
    pub pair: String,
    pub operations: usize,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub at: DateTime<Utc>,
    pub cumulative_profit: f64,
}

pub struct SummaryUseCase {
    repo: Arc<dyn OperationRepository>,
}

impl SummaryUseCase {
    pub fn new(repo: Arc<dyn OperationRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: &str) -> Result<ProfitSummary, DomainError> {
        let ops = self
            .repo
            .list(owner_id, &OperationFilter::default())
            .await?;
        Ok(summarize(&ops))
    }
}

/// Pure aggregation over a newest-first list, as the repository returns it.
pub fn summarize(ops: &[Operation]) -> ProfitSummary {
    let total_profit = ops.iter().map(|o| o.profit).sum();

    let mut pairs: Vec<PairProfit> = Vec::new();
    for op in ops {
        let pair = op.pair();
        match pairs.iter_mut().find(|p| p.pair == pair) {
            Some(p) => {
                p.operations += 1;
                p.profit += op.profit;
            }
            None => pairs.push(PairProfit {
                pair,
                operations: 1,
                profit: op.profit,
            }),
        }
    }

    let mut chart = Vec::with_capacity(ops.len());
    let mut running = 0.0;
    for op in ops.iter().rev() {
        running += op.profit;
        chart.push(ChartPoint {
            at: op.created_at,
            cumulative_profit: running,
        });
    }

    ProfitSummary {
        operations: ops.len(),
        total_profit,
        pairs,
        chart,
    }
}
