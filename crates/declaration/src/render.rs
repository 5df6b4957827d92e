use jdecl_class_file::{
    model::{Field, Method},
    AccessFlags, ClassModel,
};

type Modifiers = &'static [(AccessFlags, &'static str)];

const CLASS_MODIFIERS: Modifiers = &[
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::ABSTRACT, "abstract"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::INTERFACE, "interface"),
    (AccessFlags::STRICT, "strictfp"),
];

const FIELD_MODIFIERS: Modifiers = &[
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::TRANSIENT, "transient"),
    (AccessFlags::VOLATILE, "volatile"),
];

const METHOD_MODIFIERS: Modifiers = &[
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::ABSTRACT, "abstract"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::SYNCHRONIZED, "synchronized"),
    (AccessFlags::NATIVE, "native"),
    (AccessFlags::STRICT, "strictfp"),
];

const ROOT_CLASS: &str = "java.lang.Object";

/// Renders the declaration of a class, one line per entry, without trailing newlines.
pub fn render(model: &ClassModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(package) = model.package() {
        lines.push(format!("package {}", package));
    }
    lines.push(header(model));

    lines.extend(
        model
            .constructors
            .iter()
            .map(|constructor| format!("\t{}", self::constructor(model, constructor))),
    );
    lines.extend(model.fields.iter().map(|f| format!("\t{}", field(f))));
    lines.extend(model.methods.iter().map(|m| format!("\t{}", method(m))));

    // The closing brace is indented like the members.
    lines.push("\t}".to_owned());
    lines
}

fn modifiers<'a>(access_flags: AccessFlags, table: Modifiers) -> Vec<&'a str> {
    table
        .iter()
        .filter(|(flag, _)| access_flags.contains(*flag))
        .map(|&(_, keyword)| keyword)
        .collect()
}

fn header(model: &ClassModel) -> String {
    let mut words = modifiers(model.access_flags, CLASS_MODIFIERS);
    if !model.is_interface() {
        words.push("class");
    }
    words.push(&model.name);

    let mut header = words.join(" ");
    if let Some(super_name) = model.super_name.as_deref().filter(|&s| s != ROOT_CLASS) {
        header.push_str(" extends ");
        header.push_str(super_name);
    }
    if !model.interfaces.is_empty() {
        header.push_str(" implements ");
        header.push_str(&model.interfaces.join(", "));
    }
    header.push_str(" {");
    header
}

fn constructor(model: &ClassModel, constructor: &Method) -> String {
    let mut words = modifiers(constructor.access_flags, METHOD_MODIFIERS);
    words.push(&model.name);

    format!(
        "{}({}){};",
        words.join(" "),
        constructor.parameter_type_names.join(", "),
        throws(constructor)
    )
}

fn field(field: &Field) -> String {
    let mut words = modifiers(field.access_flags, FIELD_MODIFIERS);
    words.push(&field.type_name);
    words.push(field.name);

    format!("{};", words.join(" "))
}

fn method(method: &Method) -> String {
    let mut words = modifiers(method.access_flags, METHOD_MODIFIERS);
    words.push(method.return_type_name.as_deref().unwrap_or("void"));
    words.push(method.name);

    format!(
        "{}({}){};",
        words.join(" "),
        method.parameter_type_names.join(", "),
        throws(method)
    )
}

fn throws(method: &Method) -> String {
    match &method.exceptions {
        Some(exceptions) if !exceptions.is_empty() => format!(" throws {}", exceptions.join(", ")),
        _ => String::new(),
    }
}
