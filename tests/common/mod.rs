//! Common test utilities

use rabota::assembler::VacancyAssembler;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// HeadHunter search hit
pub fn hh_payload() -> Value {
    json!({
        "id": "93350519",
        "name": "Senior Rust Developer",
        "url": "https://api.hh.ru/vacancies/93350519?host=hh.ru",
        "alternate_url": "https://hh.ru/vacancy/93350519",
        "area": {"id": "1", "name": "Москва", "url": "https://api.hh.ru/areas/1"},
        "salary": {"from": 250000, "to": 350000, "currency": "RUR", "gross": false},
        "employer": {
            "id": "1740",
            "name": "Яндекс",
            "url": "https://api.hh.ru/employers/1740",
            "alternate_url": "https://hh.ru/employer/1740",
            "trusted": true
        },
        "snippet": {
            "requirement": "Опыт коммерческой разработки на <highlighttext>Rust</highlighttext> от 3 лет.",
            "responsibility": "Разработка высоконагруженных сервисов."
        },
        "schedule": {"id": "remote", "name": "Удаленная работа"},
        "experience": {"id": "between3And6", "name": "От 3 до 6 лет"},
        "employment": {"id": "full", "name": "Полная занятость"},
        "published_at": "2024-03-01T10:15:00+0300",
        "key_skills": [{"name": "Rust"}, {"name": "Tokio"}, {"name": "Rust"}]
    })
}

/// SuperJob vacancy
pub fn sj_payload() -> Value {
    json!({
        "id": 46541234,
        "profession": "Бухгалтер",
        "link": "https://www.superjob.ru/vakansii/buhgalter-46541234.html",
        "firm_name": "ООО Ромашка",
        "client": {"id": 555, "title": "Ромашка", "link": "https://www.superjob.ru/clients/romashka-555.html"},
        "payment_from": 60000,
        "payment_to": 0,
        "currency": "rub",
        "candidat": "Знание <b>1С</b>, опыт от года",
        "work": "Ведение первичной документации",
        "vacancyRichText": "<p>Крупная компания ищет бухгалтера.</p>",
        "date_published": 1709287200,
        "town": {"id": 4, "title": "Казань"},
        "type_of_work": {"id": 6, "title": "Полный рабочий день"},
        "place_of_work": {"id": 1, "title": "Офис"},
        "experience": {"id": 2, "title": "От 1 года"}
    })
}

/// Already canonical record, as produced by `Vacancy::to_dict`
#[allow(dead_code)]
pub fn canonical_payload() -> Value {
    json!({
        "vacancy_id": "c-1",
        "title": "Data Engineer",
        "url": "https://hh.ru/vacancy/777",
        "source": "hh.ru",
        "area": "Санкт-Петербург",
        "experience": "От 1 года до 3 лет",
        "employment": "Полная занятость",
        "description": "Пайплайны данных на Spark",
        "published_at": "2024-02-10T08:00:00+00:00",
        "salary": {"from_amount": 180000, "to_amount": 220000, "currency": "RUR"},
        "employer": {"name": "Сбер", "url": "https://hh.ru/employer/3529"}
    })
}

/// Assembler with a deterministic id generator ("gen-0", "gen-1", ...)
#[allow(dead_code)]
pub fn counting_assembler() -> VacancyAssembler {
    let counter = Arc::new(AtomicUsize::new(0));
    VacancyAssembler::default()
        .with_id_generator(move || format!("gen-{}", counter.fetch_add(1, Ordering::SeqCst)))
}
