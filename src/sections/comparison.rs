use serde::{Deserialize, Serialize};

use crate::widgets::Tooltip;

pub const SOMETIMES_TOOLTIP: &str = "Depende da experiência e disponibilidade do profissional";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Support {
    Yes,
    No,
    Sometimes,
}

impl Support {
    /// Hover hint for cells whose answer is "it depends".
    pub fn tooltip(self) -> Option<Tooltip> {
        match self {
            Support::Sometimes => Some(Tooltip::new(SOMETIMES_TOOLTIP)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub feature: String,
    pub tools: Support,
    pub freelancers: Support,
    pub automatik: Support,
}

impl ComparisonRow {
    fn new(feature: &str, tools: Support, freelancers: Support) -> Self {
        Self {
            feature: feature.into(),
            tools,
            freelancers,
            automatik: Support::Yes,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "row", rename_all = "camelCase")]
pub enum ExpandState {
    Collapsed,
    ExpandedRow(usize),
}

impl Default for ExpandState {
    fn default() -> Self {
        ExpandState::Collapsed
    }
}

/// Comparison table whose rows expand one at a time on small screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
    state: ExpandState,
}

impl Default for ComparisonTable {
    fn default() -> Self {
        Self::new(default_rows())
    }
}

impl ComparisonTable {
    pub fn new(rows: Vec<ComparisonRow>) -> Self {
        Self {
            rows,
            state: ExpandState::Collapsed,
        }
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.state == ExpandState::ExpandedRow(index)
    }

    /// Selecting the open row collapses it; any other row takes its place.
    /// Indices past the end leave the table as it is.
    pub fn toggle(&mut self, index: usize) -> ExpandState {
        if index >= self.rows.len() {
            return self.state;
        }

        self.state = match self.state {
            ExpandState::ExpandedRow(open) if open == index => ExpandState::Collapsed,
            _ => ExpandState::ExpandedRow(index),
        };
        self.state
    }
}

fn default_rows() -> Vec<ComparisonRow> {
    use Support::{No, Sometimes};

    vec![
        ComparisonRow::new("Diagnóstico estratégico do negócio antes da automação", No, No),
        ComparisonRow::new("Criação de agentes de IA com inteligência e humanização", No, Sometimes),
        ComparisonRow::new(
            "Automação 360° de toda a jornada (Marketing, Comercial, Entrega e Pós-venda)",
            No,
            Sometimes,
        ),
        ComparisonRow::new("Suporte consultivo contínuo com especialistas", No, Sometimes),
        ComparisonRow::new("Customização profunda para cultura e processos da empresa", No, Sometimes),
        ComparisonRow::new("Integração entre diferentes sistemas com IA inteligente", Sometimes, Sometimes),
        ComparisonRow::new("Construção de fluxos com visão de crescimento e escala", No, No),
        ComparisonRow::new("Acompanhamento e otimização contínua das automações", No, Sometimes),
        ComparisonRow::new("Redução de custos e aumento de produtividade como foco principal", No, No),
        ComparisonRow::new("Time dedicado e processo validado para garantir resultado", No, No),
    ]
}
