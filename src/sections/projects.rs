use serde::{Deserialize, Serialize};

use crate::widgets::Modal;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExample {
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub overview: String,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
    #[serde(default)]
    pub examples: Vec<ProjectExample>,
}

/// Project cards plus the detail dialog they open.
#[derive(Debug, Clone)]
pub struct ProjectsShowcase {
    projects: Vec<Project>,
    modal: Modal<usize>,
}

impl Default for ProjectsShowcase {
    fn default() -> Self {
        Self::new(catalog())
    }
}

impl ProjectsShowcase {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            modal: Modal::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn modal(&self) -> &Modal<usize> {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut Modal<usize> {
        &mut self.modal
    }

    pub fn open_details(&mut self, index: usize) -> Option<&Project> {
        if index >= self.projects.len() {
            return None;
        }
        self.modal.open(index);
        self.projects.get(index)
    }

    pub fn close_details(&mut self) {
        self.modal.close();
    }

    pub fn selected(&self) -> Option<&Project> {
        self.modal
            .content()
            .and_then(|index| self.projects.get(*index))
    }

    /// Dialog title; empty while nothing is selected.
    pub fn modal_title(&self) -> &str {
        self.selected()
            .map(|project| project.title.as_str())
            .unwrap_or_default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn catalog() -> Vec<Project> {
    vec![
        Project {
            title: "Super Time de Agentes".into(),
            description: "Equipe completa de agentes de IA trabalhando em conjunto para maximizar resultados".into(),
            image: "/Super Time de Agentes.png".into(),
            overview: "Múltiplos agentes de IA trabalham em conjunto, cada um com sua especialidade, para realizar tarefas complexas com precisão.".into(),
            features: strings(&[
                "Coordenação automática entre agentes especializados",
                "Distribuição inteligente de tarefas",
                "Comunicação fluida entre agentes",
                "Monitoramento em tempo real do progresso",
            ]),
            benefits: strings(&[
                "Aumento exponencial na produtividade",
                "Redução significativa de erros",
                "Escalabilidade instantânea",
                "Resultados consistentes e de alta qualidade",
            ]),
            integrations: strings(&[
                "Ferramentas de Gestão de Projetos",
                "Plataformas de Comunicação",
                "Sistemas de Automação",
                "Software de Análise de Dados",
            ]),
            examples: vec![ProjectExample {
                title: "Exemplo: Produção de Conteúdo em Vídeo".into(),
                steps: strings(&[
                    "Agente Roteirista: Desenvolve o roteiro e narrativa",
                    "Agente Designer: Cria elementos visuais e gráficos",
                    "Agente Editor: Monta e edita o vídeo",
                    "Agente Revisor: Garante qualidade e coerência",
                ]),
            }],
        },
        Project {
            title: "Super Analista de Marketing".into(),
            description: "IA especializada em análise e otimização de campanhas de marketing digital".into(),
            image: "/Super Analista_de Marketing _.png".into(),
            overview: "Um analista virtual que utiliza IA avançada para otimizar suas campanhas de marketing e maximizar o ROI.".into(),
            features: strings(&[
                "Análise de dados em tempo real",
                "Otimização automática de campanhas",
                "Previsões de tendências",
                "Relatórios personalizados",
            ]),
            benefits: strings(&[
                "Redução de 40% no custo por aquisição",
                "Aumento de 150% no ROI",
                "Insights acionáveis em tempo real",
                "Economia de tempo em análises",
            ]),
            integrations: strings(&[
                "Google Analytics",
                "Facebook Ads",
                "Google Ads",
                "Plataformas de Email Marketing",
            ]),
            examples: Vec::new(),
        },
        Project {
            title: "Super Robô Assistente".into(),
            description: "Assistente virtual inteligente para automação de processos e atendimento".into(),
            image: "/Criando um Super Roboo Assistente.png".into(),
            overview: "Um super agente que entende texto, imagem e voz e faz demonstrações automáticas do seu trabalho de automação.".into(),
            features: strings(&[
                "Mostra na prática como sua automação funciona",
                "Gera provas sociais para conquistar clientes",
                "Usa IA para entender as dores do lead e responder com eficiência",
                "Conexões prontas para WhatsApp, Google Calendar, Gmail e muito mais",
            ]),
            benefits: strings(&[
                "Demonstrações automáticas impressionantes",
                "Maior taxa de conversão de leads",
                "Atendimento personalizado 24/7",
                "Integração perfeita com sistemas existentes",
            ]),
            integrations: strings(&[
                "WhatsApp Business",
                "Google Workspace",
                "CRM",
                "Ferramentas de Automação",
            ]),
            examples: Vec::new(),
        },
        Project {
            title: "Agente de Marketing".into(),
            description: "Especialista em estratégias e execução de campanhas de marketing".into(),
            image: "/Agente de_Marketing _.png".into(),
            overview: "Um agente especializado em marketing que automatiza e otimiza suas campanhas para máximo impacto.".into(),
            features: strings(&[
                "Criação automática de conteúdo",
                "Segmentação inteligente",
                "A/B testing automático",
                "Análise de performance",
            ]),
            benefits: strings(&[
                "Aumento de 200% no engajamento",
                "Redução de 60% no tempo de execução",
                "Maior consistência nas campanhas",
                "Otimização contínua",
            ]),
            integrations: strings(&["Redes Sociais", "Plataformas de Email Marketing", "CMS", "Analytics"]),
            examples: Vec::new(),
        },
        Project {
            title: "Agente de Ligação com IA".into(),
            description: "Automação inteligente de chamadas e follow-ups comerciais".into(),
            image: "/Agente de Ligacao com IA_.png".into(),
            overview: "Um agente especializado em comunicação que automatiza e humaniza o processo de ligações e follow-ups.".into(),
            features: strings(&[
                "Reconhecimento de voz natural",
                "Personalização dinâmica do discurso",
                "Gestão inteligente de objeções",
                "Agendamento automático",
            ]),
            benefits: strings(&[
                "Aumento de 150% na taxa de contato",
                "Redução de 80% no tempo de follow-up",
                "Maior satisfação do cliente",
                "Escalabilidade imediata",
            ]),
            integrations: strings(&[
                "Sistema de Telefonia",
                "CRM",
                "Calendários",
                "Ferramentas de Vendas",
            ]),
            examples: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_card_selects_it() {
        let mut showcase = ProjectsShowcase::default();
        assert_eq!(showcase.modal_title(), "");

        let title = showcase.open_details(1).map(|p| p.title.clone());
        assert_eq!(title.as_deref(), Some("Super Analista de Marketing"));
        assert_eq!(showcase.modal_title(), "Super Analista de Marketing");
        assert!(showcase.modal().scroll_locked());

        showcase.close_details();
        assert!(showcase.selected().is_none());
        assert_eq!(showcase.modal_title(), "");
    }

    #[test]
    fn escape_closes_the_details() {
        let mut showcase = ProjectsShowcase::default();
        showcase.open_details(0);
        assert!(showcase.modal_mut().on_key("Escape"));
        assert!(showcase.selected().is_none());
    }

    #[test]
    fn missing_project_keeps_modal_closed() {
        let mut showcase = ProjectsShowcase::default();
        assert!(showcase.open_details(42).is_none());
        assert!(!showcase.modal().is_open());
    }
}
