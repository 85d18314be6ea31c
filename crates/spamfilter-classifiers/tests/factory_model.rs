use spamfilter_classifiers::config::{ModelConfig, ModelType};
use spamfilter_classifiers::dataset::Label;
use spamfilter_classifiers::error::ClassifierError;
use spamfilter_classifiers::io::{load_classifier, persist};
use spamfilter_classifiers::models::{build_classifier, TextClassifier};

fn corpus() -> (Vec<String>, Vec<Label>) {
    let rows = [
        (Label::Spam, "WINNER!! Claim your free prize now, call 09061701461"),
        (Label::Ham, "Are we still on for lunch tomorrow?"),
        (Label::Spam, "Free entry in a weekly competition to win cash, text WIN"),
        (Label::Ham, "I'll be home late, save me some dinner"),
        (Label::Spam, "URGENT! You have won a free holiday, claim now"),
        (Label::Ham, "See you at the station at 6"),
        (Label::Spam, "Cash prize waiting, reply CLAIM to collect"),
        (Label::Ham, "Can you pick up milk on the way home"),
    ];
    let x = rows.iter().map(|(_, m)| m.to_string()).collect();
    let y = rows.iter().map(|(l, _)| *l).collect();
    (x, y)
}

fn unseen() -> Vec<String> {
    vec![
        "claim your free cash prize now".to_string(),
        "dinner at home tomorrow?".to_string(),
        "".to_string(),
    ]
}

#[test]
fn factory_builds_trains_and_predicts() {
    let (x, y) = corpus();
    for model_type in [ModelType::logistic(), ModelType::linear_svm()] {
        let mut model = build_classifier(&ModelConfig::new(model_type.clone()));
        assert_eq!(model.name(), model_type.name());
        assert!(!model.is_trained());

        model.train(&x, &y).unwrap();
        assert!(model.is_trained());
        assert_eq!(model.predict(&x).unwrap(), y, "{} fits its training set", model.name());

        let pred = model.predict(&unseen()).unwrap();
        assert_eq!(pred[0], Label::Spam);
        assert_eq!(pred[1], Label::Ham);
        assert_eq!(pred.len(), 3);
    }
}

#[test]
fn only_logistic_exposes_probabilities() {
    let (x, y) = corpus();
    let mut logistic = build_classifier(&ModelConfig::new(ModelType::logistic()));
    let mut svm = build_classifier(&ModelConfig::new(ModelType::linear_svm()));
    logistic.train(&x, &y).unwrap();
    svm.train(&x, &y).unwrap();

    let probs = logistic.predict_proba(&x).unwrap().unwrap();
    assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(svm.predict_proba(&x).unwrap().is_none());
    assert!(svm.decision_function(&x).unwrap().is_some());
}

#[test]
fn predict_is_idempotent() {
    let (x, y) = corpus();
    let mut model = build_classifier(&ModelConfig::new(ModelType::linear_svm()));
    model.train(&x, &y).unwrap();
    let snapshot = model.clone();

    let first = model.decision_function(&unseen()).unwrap();
    let second = model.decision_function(&unseen()).unwrap();
    assert_eq!(first, second);
    assert_eq!(model.predict(&unseen()).unwrap(), model.predict(&unseen()).unwrap());
    assert_eq!(model, snapshot);
}

#[test]
fn persisted_model_predicts_identically() {
    let (x, y) = corpus();
    let dir = tempfile::tempdir().unwrap();

    for model_type in [ModelType::logistic(), ModelType::linear_svm()] {
        let mut model = build_classifier(&ModelConfig::new(model_type));
        model.train(&x, &y).unwrap();

        let path = dir
            .path()
            .join("models")
            .join(format!("{}_model.json", model.name()));
        persist(&model, &path).unwrap();
        let restored = load_classifier(&path).unwrap();

        assert_eq!(restored, model);
        assert_eq!(restored.predict(&unseen()).unwrap(), model.predict(&unseen()).unwrap());
        assert_eq!(
            restored.decision_function(&x).unwrap(),
            model.decision_function(&x).unwrap()
        );
    }
}

#[test]
fn untrained_classifier_refuses_to_predict_or_persist() {
    let model = build_classifier(&ModelConfig::default());
    assert!(matches!(
        model.predict(&unseen()),
        Err(ClassifierError::Untrained)
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    assert!(persist(&model, &path).is_err());
    assert!(!path.exists());
}

#[test]
fn single_class_training_set_is_rejected() {
    let (x, _) = corpus();
    let all_ham = vec![Label::Ham; x.len()];
    for model_type in [ModelType::logistic(), ModelType::linear_svm()] {
        let mut model = build_classifier(&ModelConfig::new(model_type));
        assert!(matches!(
            model.train(&x, &all_ham),
            Err(ClassifierError::InsufficientClassDiversity(Label::Ham))
        ));
        assert!(!model.is_trained());
    }
}

#[test]
fn retraining_replaces_previous_fit() {
    let (x, y) = corpus();
    let flipped: Vec<Label> = y
        .iter()
        .map(|l| if l.is_spam() { Label::Ham } else { Label::Spam })
        .collect();

    let mut model = build_classifier(&ModelConfig::new(ModelType::logistic()));
    model.train(&x, &y).unwrap();
    model.train(&x, &flipped).unwrap();
    assert_eq!(model.predict(&x).unwrap(), flipped);
}
