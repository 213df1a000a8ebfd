use persondb_core::{NewPerson, Person, PersonValidationError};

#[test]
fn new_person_keeps_name_and_age() {
    let request = NewPerson::new("Alan Turing", 41).unwrap();

    assert_eq!(request.name(), "Alan Turing");
    assert_eq!(request.age(), 41);
}

#[test]
fn new_person_rejects_empty_and_whitespace_names() {
    let empty = NewPerson::new("", 10).unwrap_err();
    assert_eq!(empty, PersonValidationError::EmptyName);

    let blank = NewPerson::new("   \t", 10).unwrap_err();
    assert_eq!(blank, PersonValidationError::EmptyName);
}

#[test]
fn new_person_does_not_trim_persisted_name() {
    let request = NewPerson::new("  spaced out  ", 5).unwrap();
    assert_eq!(request.name(), "  spaced out  ");
}

#[test]
fn person_serialization_uses_expected_wire_fields() {
    let person = Person {
        id: 7,
        name: "John Doe".to_string(),
        age: 29,
    };

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "John Doe");
    assert_eq!(json["age"], 29);

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}
