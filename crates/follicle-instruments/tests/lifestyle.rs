use follicle_core::models::questionnaire::{LifestyleFactor, QuestionnaireResponse};
use follicle_instruments::error::InstrumentError;
use follicle_instruments::instruments::lifestyle::{self, Lifestyle};
use follicle_instruments::scoring::QuestionKind;
use follicle_instruments::{all_instruments, get_instrument, Instrument};

#[test]
fn binary_answers_store_one_or_zero() {
    let mut response = QuestionnaireResponse::new();
    lifestyle::capture_binary(&mut response, LifestyleFactor::Genetics, true).unwrap();
    lifestyle::capture_binary(&mut response, LifestyleFactor::Smoking, false).unwrap();
    assert_eq!(response.factor(LifestyleFactor::Genetics), Some(1));
    assert_eq!(response.factor(LifestyleFactor::Smoking), Some(0));
}

#[test]
fn age_is_not_a_yes_no_question() {
    let mut response = QuestionnaireResponse::new();
    let err = lifestyle::capture_binary(&mut response, LifestyleFactor::Age, true).unwrap_err();
    assert!(matches!(err, InstrumentError::NotBinary("age")));
}

#[test]
fn age_must_be_between_one_and_hundred() {
    let mut response = QuestionnaireResponse::new();
    assert!(lifestyle::capture_age(&mut response, 0).is_err());
    assert!(lifestyle::capture_age(&mut response, 101).is_err());
    lifestyle::capture_age(&mut response, 42).unwrap();
    assert_eq!(response.factor(LifestyleFactor::Age), Some(42));
}

#[test]
fn catalog_lists_factors_in_order() {
    let questions = Lifestyle.questions();
    let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "genetics",
            "smoking",
            "hair_care",
            "environment",
            "hormonal_changes",
            "weight_loss",
            "age"
        ]
    );
    assert_eq!(questions[6].kind, QuestionKind::Number { min: 1, max: 100 });
}

#[test]
fn structured_input_shows_yes_no() {
    let mut response = QuestionnaireResponse::new();
    lifestyle::capture_binary(&mut response, LifestyleFactor::WeightLoss, true).unwrap();
    let text = Lifestyle.to_structured_input(&response);
    assert!(text.contains("significant weight loss recently?: Yes"));
}

#[test]
fn registry_finds_both_instruments() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["pss10", "lifestyle"]);
    assert!(get_instrument("lifestyle").is_some());
    assert!(get_instrument("vb_mapp").is_none());
}
