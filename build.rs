fn main() {
    println!("cargo:rerun-if-env-changed=SMARTLAMP_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SMARTLAMP_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=SMARTLAMP_STATUS_URL");
    println!("cargo:rerun-if-env-changed=SMARTLAMP_METRICS_URL");
    println!("cargo:rerun-if-env-changed=SMARTLAMP_METRICS_TOKEN");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
