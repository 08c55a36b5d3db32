use std::process::ExitCode;

use tfaas_client::{ClientConfig, FeatureRow, TfaasClient};

struct CliArgs {
    url: Option<String>,
    model: Option<String>,
    attrs: Vec<String>,
    values: Vec<f32>,
    cert: Option<String>,
    key: Option<String>,
    proxy: Option<String>,
    timeout_secs: Option<u64>,
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    tfaas_client::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|arg| arg == "--help" || arg == "-h") {
        usage();
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(raw.into_iter()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("[TFAAS] {}", message);
            usage();
            return ExitCode::FAILURE;
        }
    };

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.url {
        config.endpoint = url;
    }
    if let Some(cert) = args.cert {
        config.cert_path = Some(cert.into());
    }
    if let Some(key) = args.key {
        config.key_path = Some(key.into());
    }
    if let Some(proxy) = args.proxy {
        config.proxy_path = Some(proxy.into());
    }
    if let Some(secs) = args.timeout_secs {
        config.set_timeout_secs(secs);
    }

    let model = match args.model {
        Some(model) => model,
        None => {
            eprintln!("[TFAAS] --model is required");
            usage();
            return ExitCode::FAILURE;
        }
    };

    let row = match FeatureRow::new(model, args.attrs, args.values) {
        Ok(row) => row,
        Err(error) => {
            eprintln!("[TFAAS] {} error: {}", error.phase(), error);
            return ExitCode::FAILURE;
        }
    };

    let client = TfaasClient::new(config);
    match client.predict_row(&row) {
        Ok(predictions) => {
            if args.json {
                match serde_json::to_string_pretty(&predictions) {
                    Ok(output) => println!("{}", output),
                    Err(error) => {
                        eprintln!("[TFAAS] unable to render JSON: {}", error);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                for class in &predictions {
                    println!("class: {} probability: {}", class.label, class.probability);
                }
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("[TFAAS] {} error: {}", error.phase(), error);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        url: None,
        model: None,
        attrs: Vec::new(),
        values: Vec::new(),
        cert: None,
        key: None,
        proxy: None,
        timeout_secs: None,
        json: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => parsed.url = Some(required_value(&arg, args.next())?),
            "--model" => parsed.model = Some(required_value(&arg, args.next())?),
            "--attrs" => {
                parsed.attrs = required_value(&arg, args.next())?
                    .split(',')
                    .map(|entry| entry.trim().to_string())
                    .filter(|entry| !entry.is_empty())
                    .collect();
            }
            "--values" => {
                let raw = required_value(&arg, args.next())?;
                let mut values = Vec::new();
                for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                    let value = entry
                        .parse::<f32>()
                        .map_err(|_| format!("not a number in --values: {:?}", entry))?;
                    values.push(value);
                }
                parsed.values = values;
            }
            "--cert" => parsed.cert = Some(required_value(&arg, args.next())?),
            "--key" => parsed.key = Some(required_value(&arg, args.next())?),
            "--proxy" => parsed.proxy = Some(required_value(&arg, args.next())?),
            "--timeout" => {
                let raw = required_value(&arg, args.next())?;
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| format!("not a number of seconds: {:?}", raw))?;
                parsed.timeout_secs = Some(secs);
            }
            "--json" => parsed.json = true,
            other => return Err(format!("unknown argument: {:?}", other)),
        }
    }

    Ok(parsed)
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{} requires a value", flag))
}

fn usage() {
    eprintln!(
        "usage: tfaas-client --model NAME [options]\n\
         \n\
         options:\n\
           --url URL         service endpoint (default: TFAAS_URL or {})\n\
           --attrs A,B,C     comma-separated attribute names\n\
           --values 1,2,3    comma-separated attribute values\n\
           --cert PATH       client certificate PEM (TFAAS_CLIENT_CERT)\n\
           --key PATH        client key PEM (TFAAS_CLIENT_KEY)\n\
           --proxy PATH      combined cert+key PEM (TFAAS_PROXY, X509_USER_PROXY)\n\
           --timeout SECS    request timeout (TFAAS_TIMEOUT_SECS)\n\
           --json            print predictions as JSON",
        tfaas_client::DEFAULT_ENDPOINT
    );
}
