use labelkit_core::units::{mm_to_px, px_to_mm, Dpi};
use labelkit_generators::{
    BarcodeGenerator, BarcodeParameters, CodeGenerator, ErrorCorrection, QrGenerator,
    QrParameters, Symbology,
};

#[test]
fn test_qr_size_follows_dpi() {
    for dpi in [Dpi(150), Dpi(300), Dpi(600)] {
        let qr = QrGenerator::new(QrParameters {
            dpi,
            error_correction: ErrorCorrection::H,
            ..QrParameters::default()
        });
        let code = qr.generate("https://example.com/item/42").unwrap();
        let expected = mm_to_px(25.0, dpi);
        assert_eq!(code.image.dimensions(), (expected, expected));
        assert_eq!(code.width_mm, qr.size_mm());
    }
}

#[test]
fn test_barcode_width_reported_in_mm() {
    let barcode = BarcodeGenerator::new(BarcodeParameters::default());
    let code = barcode.generate("ID-0001").unwrap();
    assert!((code.width_mm - px_to_mm(code.image.width(), Dpi(300))).abs() < 1e-9);
    assert!(code.width_mm > 20.0);
}

#[test]
fn test_longer_payload_is_wider() {
    let barcode = BarcodeGenerator::new(BarcodeParameters::default());
    let short = barcode.generate("A1").unwrap();
    let long = barcode.generate("A1B2C3D4E5").unwrap();
    assert!(long.width_mm > short.width_mm);
}

#[test]
fn test_each_symbology_renders() {
    let cases = [
        (Symbology::Code128, "Hello-128"),
        (Symbology::Code39, "hello 39"),
        (Symbology::Ean13, "590123412345"),
        (Symbology::Ean13, "5901234123457"),
        (Symbology::Itf, "12345678"),
    ];
    for (symbology, data) in cases {
        let barcode = BarcodeGenerator::new(BarcodeParameters {
            symbology,
            ..BarcodeParameters::default()
        });
        let code = barcode
            .generate(data)
            .unwrap_or_else(|e| panic!("{symbology} failed for {data}: {e}"));
        assert_eq!(code.image.height(), mm_to_px(15.0, Dpi(300)));
    }
}

#[test]
fn test_ean13_check_digit_is_recomputed() {
    let barcode = BarcodeGenerator::new(BarcodeParameters {
        symbology: Symbology::Ean13,
        ..BarcodeParameters::default()
    });
    let twelve = barcode.generate("590123412345").unwrap();
    let thirteen = barcode.generate("5901234123450").unwrap();
    assert_eq!(twelve.image, thirteen.image);
}
