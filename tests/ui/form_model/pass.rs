use tripquote::form::{FieldLens, FormModel};

#[derive(Clone, tripquote::form::FormModel)]
struct DemoForm {
    email: String,
}

fn main() {
    let fields = DemoForm::fields();
    let lens = fields.email();
    let mut model = DemoForm {
        email: "a@trip.example".to_string(),
    };
    lens.set(&mut model, "b@trip.example".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "b@trip.example");
    assert_eq!(DemoForm::field_keys().len(), 1);
}
