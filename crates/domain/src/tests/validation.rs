// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookData, DomainError, LoanForm, LoanFormField, NewLoan};

#[test]
fn test_validate_loan_form_accepts_both_fields() {
    let form: LoanForm = LoanForm::new(" 3 ", "7");
    let new_loan: NewLoan = form.validate().unwrap();

    assert_eq!(new_loan.user_id, "3");
    assert_eq!(new_loan.book_id, "7");
    assert_eq!(
        serde_json::to_value(&new_loan).unwrap(),
        serde_json::json!({"usuario_id": "3", "libro_id": "7"})
    );
}

#[test]
fn test_validate_loan_form_requires_user() {
    let form: LoanForm = LoanForm::new("", "7");
    assert_eq!(
        form.validate(),
        Err(DomainError::MissingField {
            field: "usuario_id"
        })
    );
}

#[test]
fn test_validate_loan_form_requires_book() {
    let form: LoanForm = LoanForm::new("3", "  ");
    assert_eq!(
        form.validate(),
        Err(DomainError::MissingField { field: "libro_id" })
    );
}

#[test]
fn test_loan_form_set_and_reset() {
    let mut form: LoanForm = LoanForm::default();
    assert!(form.is_empty());

    form.set(LoanFormField::UserId, "3");
    form.set(LoanFormField::BookId, "7");
    assert_eq!(form, LoanForm::new("3", "7"));
}

#[test]
fn test_book_data_requires_title() {
    let data: BookData = BookData {
        title: String::from(" "),
        author_ids: vec![1],
        publication_year: 1965,
        available_stock: 3,
    };
    assert_eq!(
        data.validate(),
        Err(DomainError::MissingField { field: "titulo" })
    );
}

#[test]
fn test_book_data_omits_empty_author_list() {
    let data: BookData = BookData {
        title: String::from("Dune"),
        author_ids: Vec::new(),
        publication_year: 1965,
        available_stock: 3,
    };
    assert!(data.validate().is_ok());
    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        serde_json::json!({"titulo": "Dune", "año_publicacion": 1965, "stock_disponible": 3})
    );
}
