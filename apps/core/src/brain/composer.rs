//! Template-based response composition.
//!
//! Every intent maps to a canned Portuguese reply; some templates weave in
//! the dominant topic or the recognized concepts so the answer does not read
//! fully static. Always returns a non-empty string, whatever the inputs.

use super::intent::Intent;
use super::lexicon::SemanticReading;

/// How many topics the general-inquiry reply enumerates at most.
const GENERAL_TOPIC_LIMIT: usize = 3;

fn capabilities_reply() -> String {
    "Posso ajudar você com:\n\
     1. Agendamento de visitas e compromissos\n\
     2. Informações sobre preços e planos\n\
     3. Dúvidas sobre nossos serviços\n\
     4. Suporte quando algo não funciona\n\n\
     É só me dizer o que você precisa!"
        .to_string()
}

fn scheduling_reply(semantics: &SemanticReading) -> String {
    let mut reply = String::from(
        "Claro! Para agendar, preciso de algumas informações:\n\
         - Nome do cliente\n\
         - Data desejada\n\
         - Horário\n\
         - Serviço a ser realizado\n",
    );
    let mentioned: Vec<&str> = semantics
        .recognized
        .iter()
        .filter(|c| c.topic == "agendamento")
        .map(|c| c.concept.as_str())
        .collect();
    if !mentioned.is_empty() {
        reply.push_str(&format!(
            "\nJá entendi que se trata de: {}.",
            mentioned.join(", ")
        ));
    }
    reply.push_str("\nPode me passar o que estiver faltando?");
    reply
}

fn pricing_reply() -> String {
    "Sobre preços e planos:\n\
     1. Temos opções para diferentes tamanhos de empresa\n\
     2. O valor depende dos serviços incluídos\n\
     3. Posso encaminhar uma proposta detalhada\n\n\
     Quer que eu envie as opções disponíveis?"
        .to_string()
}

fn how_to_reply(semantics: &SemanticReading) -> String {
    match semantics.dominant_topic.as_deref() {
        Some(topic) => format!(
            "Vou te explicar o passo a passo sobre {topic}:\n\
             1. Me diga exatamente o que você quer fazer\n\
             2. Eu te guio por cada etapa\n\n\
             Qual parte está gerando dúvida?"
        ),
        None => "Posso te explicar o passo a passo. \
                 Me conta com mais detalhes o que você quer fazer?"
            .to_string(),
    }
}

fn status_reply() -> String {
    "Para verificar o andamento, me informe:\n\
     1. O nome do cliente ou número do pedido\n\
     2. A data aproximada da solicitação\n\n\
     Com isso eu localizo o status para você."
        .to_string()
}

fn location_reply() -> String {
    "Sobre localização e endereço:\n\
     1. Atendemos na região informada no cadastro da empresa\n\
     2. Visitas a clientes são agendadas conforme a agenda disponível\n\n\
     Precisa do endereço de alguma unidade específica?"
        .to_string()
}

fn time_reply() -> String {
    "Sobre horários:\n\
     1. Nosso atendimento funciona em horário comercial\n\
     2. Agendamentos podem ser feitos dentro do expediente\n\n\
     Quer verificar a disponibilidade de algum horário?"
        .to_string()
}

fn issue_reply(semantics: &SemanticReading) -> String {
    let mut reply = String::from(
        "Sinto muito pelo transtorno! Vamos resolver:\n\
         1. Me descreva o que aconteceu\n\
         2. Diga quando o problema começou\n\
         3. Se houver mensagem de erro, me envie o texto\n",
    );
    if semantics.topics.contains_key("agendamento") {
        reply.push_str("\nSe for um problema com agendamento, posso remarcar para você.");
    }
    reply
}

fn general_reply(semantics: &SemanticReading) -> String {
    let topics = semantics.top_topics(GENERAL_TOPIC_LIMIT);
    if topics.is_empty() {
        return "Entendi sua mensagem, mas preciso de mais detalhes para ajudar. \
                Pode me contar um pouco mais sobre o que você precisa?"
            .to_string();
    }
    format!(
        "Percebi que sua mensagem fala sobre: {}.\n\
         Pode me dar mais detalhes para eu te ajudar melhor?",
        topics.join(", ")
    )
}

/// Composes the rule-based reply for a classified message.
pub fn compose(intent: Intent, semantics: &SemanticReading) -> String {
    match intent {
        Intent::AskCapabilities => capabilities_reply(),
        Intent::AskScheduling => scheduling_reply(semantics),
        Intent::AskPricing => pricing_reply(),
        Intent::AskHowTo => how_to_reply(semantics),
        Intent::AskStatus => status_reply(),
        Intent::AskLocation => location_reply(),
        Intent::AskTime => time_reply(),
        Intent::ReportIssue => issue_reply(semantics),
        Intent::GeneralInquiry => general_reply(semantics),
    }
}
