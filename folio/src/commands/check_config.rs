use folio_config::Config;

pub fn check_config(config: &Config, verbose: bool) {
    if verbose {
        println!("{config:#?}");
    }

    for missing in missing_settings(config) {
        eprintln!("warning: {missing} is not set, form submissions will fail");
    }
}

fn missing_settings(config: &Config) -> Vec<&'static str> {
    let api_key = config
        .email
        .api_key
        .as_ref()
        .is_some_and(|key| !key.trim().is_empty());

    [
        (!api_key).then_some("email.api_key"),
        config
            .forms
            .owner_email
            .is_none()
            .then_some("forms.owner_email"),
    ]
    .into_iter()
    .flatten()
    .collect()
}
