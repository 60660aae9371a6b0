//! Lexicon matcher: maps tokens to domain concepts and aggregates topics.
//!
//! The built-in lexicon is a compiled-in constant table, searched in
//! declaration order (earlier entries win ties). A token matches an entry
//! when its normalized form is a *substring* of one of the entry's synonyms.
//! The containment check is deliberate: it tolerates conjugations and
//! inflections ("agendar"/"agendamento") at the cost of some false
//! positives, and replacing it with exact equality would change recall
//! substantially.
//!
//! Tokens with no built-in match fall back to the tenant vocabulary
//! (topic "custom"); still-unknown tokens of 4+ chars are surfaced as
//! [`PendingWord`]s for human curation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::normalize::normalize_for_lexicon;
use super::tokenizer::is_stopword;
use crate::models::{PendingWord, VocabularyEntry};

/// Minimum original-token length for an unknown word to be flagged pending.
const PENDING_WORD_MIN_LEN: usize = 4;

/// Topic assigned to concepts sourced from the tenant vocabulary.
const CUSTOM_TOPIC: &str = "custom";

/// One entry of the built-in lexicon. Synonyms are declared lowercase and
/// accent-folded so lookups can compare without re-normalizing the table.
struct LexiconEntry {
    concept: &'static str,
    definition: &'static str,
    synonyms: &'static [&'static str],
    topic: &'static str,
}

/// Built-in business-chat lexicon. Declaration order is the match priority.
const LEXICON: &[LexiconEntry] = &[
    LexiconEntry {
        concept: "preço",
        definition: "Valor cobrado por um produto ou serviço",
        synonyms: &["preco", "precos", "valor", "valores", "custo", "custos", "tarifa", "tarifas"],
        topic: "comercial",
    },
    LexiconEntry {
        concept: "planos",
        definition: "Pacotes de assinatura oferecidos pela empresa",
        synonyms: &["plano", "planos", "pacote", "pacotes", "assinatura", "assinaturas", "mensalidade", "mensalidades"],
        topic: "comercial",
    },
    LexiconEntry {
        concept: "pagamento",
        definition: "Forma ou ato de pagar por um serviço",
        synonyms: &["pagamento", "pagamentos", "pagar", "cobranca", "cobrancas", "boleto", "boletos", "cartao", "pix", "fatura", "faturas"],
        topic: "comercial",
    },
    LexiconEntry {
        concept: "agendamento",
        definition: "Marcação de um horário de atendimento",
        synonyms: &["agendamento", "agendamentos", "agendar", "agenda", "marcar", "marcacao", "remarcar", "desmarcar"],
        topic: "agendamento",
    },
    LexiconEntry {
        concept: "compromisso",
        definition: "Evento marcado com data e hora",
        synonyms: &["compromisso", "compromissos", "reuniao", "reunioes", "encontro", "encontros"],
        topic: "agendamento",
    },
    LexiconEntry {
        concept: "visita",
        definition: "Deslocamento até o cliente para prestar serviço",
        synonyms: &["visita", "visitas", "visitar"],
        topic: "agendamento",
    },
    LexiconEntry {
        concept: "horário",
        definition: "Hora de um compromisso ou do expediente",
        synonyms: &["horario", "horarios", "hora", "horas", "expediente"],
        topic: "agendamento",
    },
    LexiconEntry {
        concept: "data",
        definition: "Dia em que algo acontece",
        synonyms: &[
            "data", "datas", "dia", "dias", "semana", "semanas", "mes", "meses", "hoje", "amanha",
            "segunda", "terca", "quarta", "quinta", "sexta", "sabado", "domingo", "feira",
        ],
        topic: "agendamento",
    },
    LexiconEntry {
        concept: "cliente",
        definition: "Pessoa ou empresa atendida",
        synonyms: &["cliente", "clientes", "consumidor", "consumidores"],
        topic: "atendimento",
    },
    LexiconEntry {
        concept: "problema",
        definition: "Falha ou dificuldade relatada pelo usuário",
        synonyms: &["problema", "problemas", "erro", "erros", "falha", "falhas", "defeito", "defeitos", "bug", "bugs", "travou", "quebrou"],
        topic: "suporte",
    },
    LexiconEntry {
        concept: "ajuda",
        definition: "Pedido de auxílio ou esclarecimento",
        synonyms: &["ajuda", "ajudar", "auxilio", "socorro", "suporte", "duvida", "duvidas"],
        topic: "suporte",
    },
    LexiconEntry {
        concept: "cancelamento",
        definition: "Desistência de um serviço ou compromisso",
        synonyms: &["cancelamento", "cancelamentos", "cancelar", "cancela"],
        topic: "atendimento",
    },
    LexiconEntry {
        concept: "mensagem",
        definition: "Comunicação enviada ou recebida",
        synonyms: &["mensagem", "mensagens", "whatsapp", "email", "contato", "contatos", "telefone", "ligacao"],
        topic: "atendimento",
    },
    LexiconEntry {
        concept: "serviço",
        definition: "Trabalho prestado ao cliente",
        synonyms: &["servico", "servicos", "atendimento", "atendimentos"],
        topic: "empresa",
    },
    LexiconEntry {
        concept: "empresa",
        definition: "O negócio que presta o atendimento",
        synonyms: &["empresa", "empresas", "negocio", "negocios", "companhia"],
        topic: "empresa",
    },
    LexiconEntry {
        concept: "endereço",
        definition: "Localização física da empresa ou do cliente",
        synonyms: &["endereco", "enderecos", "local", "locais", "localizacao", "unidade", "unidades"],
        topic: "empresa",
    },
    LexiconEntry {
        concept: "limpeza",
        definition: "Serviço de limpeza ou higienização",
        synonyms: &["limpeza", "limpezas", "limpar", "higienizacao"],
        topic: "servicos",
    },
    LexiconEntry {
        concept: "conserto",
        definition: "Serviço de reparo ou manutenção",
        synonyms: &["conserto", "consertos", "consertar", "reparo", "reparos", "manutencao", "instalacao"],
        topic: "servicos",
    },
];

/// A lexicon (or tenant-vocabulary) hit for one token of the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedConcept {
    /// Canonical concept name.
    pub concept: String,
    /// Human-readable definition.
    pub definition: String,
    /// The original token that produced the match.
    pub token: String,
    /// Coarse topic grouping.
    pub topic: String,
}

/// Semantic interpretation of one message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticReading {
    /// Recognized concepts, ordered by (topic frequency, concept name) desc.
    pub recognized: Vec<RecognizedConcept>,
    /// Topic with the highest tally, if anything was recognized.
    pub dominant_topic: Option<String>,
    /// Occurrence count per topic within this message.
    pub topics: HashMap<String, usize>,
    /// Unknown words proposed for human curation.
    pub new_words: Vec<PendingWord>,
}

impl SemanticReading {
    /// Up to `limit` topic names, most frequent first.
    pub fn top_topics(&self, limit: usize) -> Vec<String> {
        let mut pairs: Vec<(&String, &usize)> = self.topics.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(a.1).then(b.0.cmp(a.0)));
        pairs.into_iter().take(limit).map(|(t, _)| t.clone()).collect()
    }
}

/// Interprets a token stream against the built-in lexicon and the tenant's
/// dynamic vocabulary.
pub fn interpret(
    tokens: &[String],
    tenant_vocabulary: &HashMap<String, VocabularyEntry>,
) -> SemanticReading {
    let mut recognized: Vec<RecognizedConcept> = Vec::new();
    let mut new_words: Vec<PendingWord> = Vec::new();

    for token in tokens {
        if is_stopword(token) {
            continue;
        }
        let normalized = normalize_for_lexicon(token);
        if normalized.is_empty() {
            continue;
        }

        // 1. Built-in lexicon, declaration order, substring containment.
        if let Some(entry) = LEXICON
            .iter()
            .find(|e| e.synonyms.iter().any(|syn| syn.contains(normalized.as_str())))
        {
            recognized.push(RecognizedConcept {
                concept: entry.concept.to_string(),
                definition: entry.definition.to_string(),
                token: token.clone(),
                topic: entry.topic.to_string(),
            });
            continue;
        }

        // 2. Tenant vocabulary, exact key lookup on the normalized form.
        if let Some(vocab) = tenant_vocabulary.get(&normalized) {
            recognized.push(RecognizedConcept {
                concept: vocab.word.clone(),
                definition: vocab.definition.clone(),
                token: token.clone(),
                topic: CUSTOM_TOPIC.to_string(),
            });
            continue;
        }

        // 3. Unknown word worth curating.
        if token.chars().count() >= PENDING_WORD_MIN_LEN
            && !new_words.iter().any(|w| w.word == *token)
        {
            new_words.push(PendingWord::pending(token));
        }
    }

    let mut topics: HashMap<String, usize> = HashMap::new();
    for concept in &recognized {
        *topics.entry(concept.topic.clone()).or_insert(0) += 1;
    }

    // Concepts from the most frequent topics surface first; ties broken by
    // concept name, also descending.
    recognized.sort_by(|a, b| {
        let count_a = topics.get(&a.topic).copied().unwrap_or(0);
        let count_b = topics.get(&b.topic).copied().unwrap_or(0);
        count_b
            .cmp(&count_a)
            .then_with(|| b.concept.cmp(&a.concept))
    });

    let dominant_topic = topics
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(topic, _)| topic.clone());

    SemanticReading {
        recognized,
        dominant_topic,
        topics,
        new_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::tokenizer::tokenize;

    fn no_vocab() -> HashMap<String, VocabularyEntry> {
        HashMap::new()
    }

    #[test]
    fn test_pricing_message_maps_to_comercial() {
        let tokens = tokenize("Qual o preço dos planos?");
        let reading = interpret(&tokens, &no_vocab());

        let concepts: Vec<&str> = reading.recognized.iter().map(|c| c.concept.as_str()).collect();
        assert!(concepts.contains(&"preço"));
        assert!(concepts.contains(&"planos"));
        assert_eq!(reading.dominant_topic.as_deref(), Some("comercial"));
        assert_eq!(reading.topics.get("comercial"), Some(&2));
    }

    #[test]
    fn test_topic_tally_matches_recognized_counts() {
        let tokens = tokenize("quero agendar uma visita e pagar o boleto");
        let reading = interpret(&tokens, &no_vocab());

        for concept in &reading.recognized {
            let expected = reading
                .recognized
                .iter()
                .filter(|c| c.topic == concept.topic)
                .count();
            assert_eq!(reading.topics.get(&concept.topic), Some(&expected));
        }
    }

    #[test]
    fn test_recognized_ordered_by_topic_frequency() {
        // two agendamento hits, one suporte hit: agendamento concepts first
        let tokens = tokenize("agendar visita com problema");
        let reading = interpret(&tokens, &no_vocab());

        assert_eq!(reading.recognized.len(), 3);
        assert_eq!(reading.recognized[0].topic, "agendamento");
        assert_eq!(reading.recognized[1].topic, "agendamento");
        assert_eq!(reading.recognized[2].topic, "suporte");
        assert_eq!(reading.dominant_topic.as_deref(), Some("agendamento"));
    }

    #[test]
    fn test_unknown_long_words_become_pending() {
        let tokens = tokenize("limpesa do rack do cliente Farkon");
        let reading = interpret(&tokens, &no_vocab());

        let pending: Vec<&str> = reading.new_words.iter().map(|w| w.word.as_str()).collect();
        assert!(pending.contains(&"limpesa"));
        assert!(pending.contains(&"rack"));
        assert!(pending.contains(&"farkon"));
        for word in &reading.new_words {
            assert_eq!(word.status, "pending");
        }
    }

    #[test]
    fn test_short_unknown_words_not_flagged() {
        let tokens = tokenize("xb zk qw");
        let reading = interpret(&tokens, &no_vocab());

        assert!(reading.recognized.is_empty());
        assert!(reading.new_words.is_empty());
        assert!(reading.dominant_topic.is_none());
    }

    #[test]
    fn test_tenant_vocabulary_hit_gets_custom_topic() {
        let mut vocab = HashMap::new();
        vocab.insert(
            "rack".to_string(),
            VocabularyEntry {
                word: "rack".to_string(),
                definition: "Armário de equipamentos de rede".to_string(),
                synonyms: vec![],
                examples: vec![],
            },
        );

        let tokens = tokenize("limpeza do rack");
        let reading = interpret(&tokens, &vocab);

        let rack = reading
            .recognized
            .iter()
            .find(|c| c.concept == "rack")
            .expect("tenant word should be recognized");
        assert_eq!(rack.topic, "custom");
        assert!(reading.new_words.is_empty());
    }

    #[test]
    fn test_substring_matching_tolerates_inflection() {
        // "agendamentos" singularizes to "agendamento" which is contained in
        // the synonym "agendamentos"; "marcando" is not covered and 4+ chars
        let tokens = tokenize("agendamentos");
        let reading = interpret(&tokens, &no_vocab());
        assert_eq!(reading.recognized.len(), 1);
        assert_eq!(reading.recognized[0].concept, "agendamento");
    }

    #[test]
    fn test_duplicate_pending_words_collapse() {
        let tokens = tokenize("zyrtak zyrtak zyrtak");
        let reading = interpret(&tokens, &no_vocab());
        assert_eq!(reading.new_words.len(), 1);
    }
}
