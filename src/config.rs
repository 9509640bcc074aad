use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub records_path: String,
    pub ethereum_rpc: String,
    pub contract_address: String,
    pub ocr_binary: String,
    pub ocr_language: String,
    pub ocr_timeout_secs: u64,
    pub max_upload_bytes: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            records_path: std::env::var("RECORDS_PATH")
                .unwrap_or_else(|_| "data/sample_records.json".to_string()),
            ethereum_rpc: std::env::var("ETHEREUM_RPC")
                .unwrap_or_else(|_| "https://rpc-mumbai.maticvigil.com/".to_string())
                .trim()
                .to_string(),
            contract_address: std::env::var("CONTRACT_ADDRESS")
                .unwrap_or_else(|_| "0x1234567890abcdef1234567890abcdef12345678".to_string()),
            ocr_binary: std::env::var("OCR_BINARY")
                .unwrap_or_else(|_| "tesseract".to_string()),
            ocr_language: std::env::var("OCR_LANGUAGE")
                .unwrap_or_else(|_| "eng".to_string()),
            ocr_timeout_secs: std::env::var("OCR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("OCR_TIMEOUT_SECS must be a positive number"))?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a positive number"))?,
        };

        if config.ethereum_rpc.is_empty() {
            anyhow::bail!("ETHEREUM_RPC cannot be empty");
        }
        if !config.ethereum_rpc.starts_with("http://") && !config.ethereum_rpc.starts_with("https://")
        {
            anyhow::bail!("ETHEREUM_RPC must start with http:// or https://");
        }
        if !is_contract_address(&config.contract_address) {
            anyhow::bail!("CONTRACT_ADDRESS must be a 0x-prefixed 20-byte hex address");
        }
        if config.ocr_binary.trim().is_empty() {
            anyhow::bail!("OCR_BINARY cannot be empty");
        }
        if config.ocr_language.trim().is_empty() {
            anyhow::bail!("OCR_LANGUAGE cannot be empty");
        }
        if config.ocr_timeout_secs == 0 {
            anyhow::bail!("OCR_TIMEOUT_SECS must be greater than zero");
        }
        if config.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Records path: {}", config.records_path);
        tracing::debug!("Ethereum RPC: {}", config.ethereum_rpc);
        tracing::debug!("Contract address: {}", config.contract_address);
        tracing::debug!(
            "OCR engine: {} (language: {}, timeout: {}s)",
            config.ocr_binary,
            config.ocr_language,
            config.ocr_timeout_secs
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn is_contract_address(addr: &str) -> bool {
    addr.len() == 42
        && addr.starts_with("0x")
        && addr[2..].chars().all(|c| c.is_ascii_hexdigit())
}
