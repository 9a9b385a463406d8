//! Integration tests for vacancy assembly across provider shapes

mod common;

use chrono::{TimeZone, Utc};
use rabota::assembler::VacancyAssembler;
use rabota::config::NormalizerConfig;
use rabota::models::{Employer, Experience};
use rabota::pipeline::cast_to_object_list;
use serde_json::json;
use std::sync::Arc;

use common::{canonical_payload, counting_assembler, hh_payload, sj_payload};

#[test]
fn test_hh_payload() {
    let vacancy = VacancyAssembler::default().from_dict(&hh_payload()).unwrap();

    assert_eq!(vacancy.id(), "93350519");
    assert_eq!(vacancy.title, "Senior Rust Developer");
    assert_eq!(vacancy.url, "https://hh.ru/vacancy/93350519");
    assert_eq!(vacancy.source, "hh.ru");
    assert_eq!(vacancy.area.as_deref(), Some("Москва"));
    assert_eq!(vacancy.schedule.as_deref(), Some("Удаленная работа"));
    assert_eq!(vacancy.skills, vec!["Rust", "Tokio"]);

    assert_eq!(vacancy.salary.amount_from, Some(250_000));
    assert_eq!(vacancy.salary.amount_to, Some(350_000));
    assert_eq!(vacancy.salary.average(), 300_000);

    let employer = vacancy.employer.as_ref().unwrap();
    assert_eq!(employer.name, "Яндекс");
    assert_eq!(employer.trusted, Some(true));
    assert_eq!(vacancy.employer_external_id.as_deref(), Some("1740"));

    assert_eq!(
        vacancy.experience,
        Some(Experience::new("От 3 до 6 лет", Some("between3And6".to_string())))
    );
    assert_eq!(vacancy.employment.as_ref().map(|e| e.name.as_str()), Some("Полная занятость"));
    assert_eq!(
        vacancy.published_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 7, 15, 0).unwrap())
    );
}

#[test]
fn test_hh_snippet_sections() {
    let vacancy = VacancyAssembler::default().from_dict(&hh_payload()).unwrap();

    assert_eq!(
        vacancy.requirements.as_deref(),
        Some("Опыт коммерческой разработки на Rust от 3 лет.")
    );
    assert_eq!(
        vacancy.responsibilities.as_deref(),
        Some("Разработка высоконагруженных сервисов.")
    );
    assert_eq!(
        vacancy.description,
        "Requirements: Опыт коммерческой разработки на Rust от 3 лет.\n\
         Responsibilities: Разработка высоконагруженных сервисов."
    );
}

#[test]
fn test_sj_payload() {
    let vacancy = VacancyAssembler::default().from_dict(&sj_payload()).unwrap();

    assert_eq!(vacancy.id(), "46541234");
    assert_eq!(vacancy.title, "Бухгалтер");
    assert_eq!(vacancy.source, "superjob.ru");
    assert_eq!(vacancy.area.as_deref(), Some("Казань"));
    assert_eq!(vacancy.schedule.as_deref(), Some("Офис"));
    assert_eq!(vacancy.description, "<p>Крупная компания ищет бухгалтера.</p>");
    assert_eq!(vacancy.requirements.as_deref(), Some("Знание 1С, опыт от года"));
    assert_eq!(vacancy.responsibilities.as_deref(), Some("Ведение первичной документации"));

    assert_eq!(vacancy.salary.amount_from, Some(60_000));
    assert_eq!(vacancy.salary.amount_to, None);
    assert_eq!(vacancy.salary.currency, "RUB");
    assert_eq!(vacancy.salary.to_string(), "from 60000 RUB");

    let employer = vacancy.employer.as_ref().unwrap();
    assert_eq!(employer.name, "Ромашка");
    assert_eq!(employer.external_id.as_deref(), Some("555"));
    assert_eq!(vacancy.employer_external_id.as_deref(), Some("555"));

    assert_eq!(vacancy.employment.as_ref().map(|e| e.name.as_str()), Some("Полный рабочий день"));
    assert_eq!(vacancy.experience.as_ref().map(|e| e.name.as_str()), Some("От 1 года"));
    assert_eq!(vacancy.published_at.map(|dt| dt.timestamp()), Some(1_709_287_200));
}

#[test]
fn test_canonical_payload_is_idempotent() {
    let assembler = VacancyAssembler::default();
    let vacancy = assembler.from_dict(&canonical_payload()).unwrap();

    assert_eq!(vacancy.id(), "c-1");
    assert_eq!(
        vacancy.employer.as_ref().and_then(|e| e.profile_url.as_deref()),
        Some("https://hh.ru/employer/3529")
    );
    assert_eq!(vacancy.to_dict(), canonical_payload());
}

#[test]
fn test_round_trip_keeps_title_url_source() {
    let assembler = VacancyAssembler::default();
    for payload in [hh_payload(), sj_payload(), json!({"name": "Тестировщик"})] {
        let first = assembler.from_dict(&payload).unwrap();
        let second = assembler.from_dict(&first.to_dict()).unwrap();

        assert_eq!(second.id(), first.id());
        assert_eq!(second.title, first.title);
        assert_eq!(second.url, first.url);
        assert_eq!(second.source, first.source);
        assert_eq!(second.salary.amount_from, first.salary.amount_from);
    }
}

#[test]
fn test_to_dict_projection() {
    let vacancy = VacancyAssembler::default().from_dict(&hh_payload()).unwrap();
    let dict = vacancy.to_dict();

    assert_eq!(dict["vacancy_id"], "93350519");
    assert_eq!(dict["experience"], "От 3 до 6 лет");
    assert_eq!(dict["published_at"], "2024-03-01T07:15:00+00:00");
    assert_eq!(
        dict["salary"],
        json!({"from_amount": 250000, "to_amount": 350000, "currency": "RUR"})
    );
    assert_eq!(
        dict["employer"],
        json!({"name": "Яндекс", "url": "https://hh.ru/employer/1740"})
    );
}

#[test]
fn test_to_dict_omits_missing_salary_and_employer() {
    let dict = VacancyAssembler::default()
        .from_dict(&json!({"title": "X"}))
        .unwrap()
        .to_dict();
    let map = dict.as_object().unwrap();

    assert!(!map.contains_key("salary"));
    assert!(!map.contains_key("employer"));
    assert_eq!(map["experience"], json!(null));
}

#[test]
fn test_description_fallbacks() {
    let assembler = VacancyAssembler::default();

    let labeled = assembler
        .from_dict(&json!({"title": "X", "requirements": "A", "responsibilities": "B"}))
        .unwrap();
    assert!(labeled.description.contains("Requirements: A"));
    assert!(labeled.description.contains("Responsibilities: B"));

    let bare = assembler.from_dict(&json!({"title": "X"})).unwrap();
    assert_eq!(bare.description, "Vacancy: X");
    assert!(!bare.description.is_empty());
}

#[test]
fn test_html_stripped_from_sections() {
    let vacancy = VacancyAssembler::default()
        .from_dict(&json!({"title": "X", "requirements": "<b>Python</b> 3+"}))
        .unwrap();
    assert_eq!(vacancy.requirements.as_deref(), Some("Python 3+"));
}

#[test]
fn test_description_mining_fills_missing_sections() {
    let payload = json!({
        "id": "1",
        "name": "Backend",
        "description": "<p>О компании.</p><p><strong>Обязанности:</strong></p><ul><li>Проектировать API</li></ul>\
                        <p><strong>Требования:</strong></p><ul><li>PostgreSQL, Kafka</li></ul>",
        "snippet": {"requirement": "Опыт от 3 лет"}
    });
    let vacancy = VacancyAssembler::default().from_dict(&payload).unwrap();

    assert_eq!(vacancy.requirements.as_deref(), Some("Опыт от 3 лет"));
    assert_eq!(vacancy.responsibilities.as_deref(), Some("• Проектировать API"));
}

#[test]
fn test_custom_miner_injected() {
    let assembler = VacancyAssembler::default().with_miner(|text: &str| -> (Option<String>, Option<String>) {
        (Some(format!("req from {} chars", text.chars().count())), None)
    });
    let vacancy = assembler.from_dict(&json!({"description": "abcd"})).unwrap();
    assert_eq!(vacancy.requirements.as_deref(), Some("req from 4 chars"));
    assert_eq!(vacancy.responsibilities, None);
}

#[test]
fn test_source_detection_from_alternate_url() {
    let vacancy = VacancyAssembler::default()
        .from_dict(&json!({"alternate_url": "https://spb.hh.ru/vacancy/1"}))
        .unwrap();
    assert_eq!(vacancy.source, "hh.ru");
}

#[test]
fn test_explicit_source_not_overridden() {
    let mut payload = hh_payload();
    payload["source"] = json!("partner-feed");
    let vacancy = VacancyAssembler::default().from_dict(&payload).unwrap();
    assert_eq!(vacancy.source, "partner-feed");
}

#[test]
fn test_ids_stable_and_generated() {
    let assembler = counting_assembler();

    let with_id = json!({"id": "42", "title": "X"});
    assert_eq!(assembler.from_dict(&with_id).unwrap().id(), "42");
    assert_eq!(assembler.from_dict(&with_id).unwrap().id(), "42");

    let without_id = json!({"title": "X"});
    let first = assembler.from_dict(&without_id).unwrap();
    let second = assembler.from_dict(&without_id).unwrap();
    assert_eq!(first.id(), "gen-0");
    assert_eq!(second.id(), "gen-1");
}

#[test]
fn test_default_generator_ids_differ() {
    let assembler = VacancyAssembler::default();
    let payload = json!({"title": "X"});
    let first = assembler.from_dict(&payload).unwrap();
    let second = assembler.from_dict(&payload).unwrap();
    assert!(!first.id().is_empty());
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_employer_string_and_sentinel() {
    let assembler = VacancyAssembler::default();

    let named = assembler.from_dict(&json!({"employer": "Acme"})).unwrap();
    assert_eq!(named.employer.unwrap(), json!({"name": "Acme"}));

    let unnamed = assembler.from_dict(&json!({"employer": {"id": "5"}})).unwrap();
    assert_eq!(
        unnamed.employer,
        Some(Employer {
            name: "Not specified".to_string(),
            external_id: Some("5".to_string()),
            trusted: None,
            profile_url: None,
        })
    );
}

#[test]
fn test_configured_sentinels() {
    let config = NormalizerConfig {
        untitled_title: "Без названия".to_string(),
        description_prefix: "Вакансия".to_string(),
        default_currency: "KZT".to_string(),
        ..NormalizerConfig::default()
    };
    let vacancy = VacancyAssembler::new(Arc::new(config)).from_dict(&json!({})).unwrap();

    assert_eq!(vacancy.title, "Без названия");
    assert_eq!(vacancy.description, "Вакансия: Без названия");
    assert_eq!(vacancy.salary.currency, "KZT");
}

#[test]
fn test_batch_cast_skips_only_invalid() {
    let assembler = VacancyAssembler::default();
    let payloads = vec![
        hh_payload(),
        json!({"not": "a vacancy but still a dict missing everything"}),
        json!(["definitely", "not", "a", "mapping"]),
        sj_payload(),
    ];

    let vacancies = cast_to_object_list(&assembler, &payloads);
    assert_eq!(vacancies.len(), 3);
    assert_eq!(vacancies[0].id(), "93350519");
    assert_eq!(vacancies[1].title, "Untitled");
    assert_eq!(vacancies[2].id(), "46541234");
}
