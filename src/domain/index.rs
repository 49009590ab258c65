use crate::domain::error::{AppError, Result};

/// The correction indices supported by the Calculadora do Cidadão form,
/// identified by the registry codes the form expects in `selIndice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    IgpM,
    IgpDi,
    Inpc,
    Ipca,
    IpcaE,
    IpcBrasil,
    IpcSp,
}

impl Index {
    pub const ALL: [Index; 7] = [
        Index::IgpM,
        Index::IgpDi,
        Index::Inpc,
        Index::Ipca,
        Index::IpcaE,
        Index::IpcBrasil,
        Index::IpcSp,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Index::IgpM => "00189IGP-M",
            Index::IgpDi => "00190IGP-DI",
            Index::Inpc => "00188INPC",
            Index::Ipca => "00433IPCA",
            Index::IpcaE => "10764IPC-E",
            Index::IpcBrasil => "00191IPC-BRASIL",
            Index::IpcSp => "00193IPC-SP",
        }
    }

    /// Descriptive label as the remote form shows it, including the month the
    /// series starts at.
    pub fn label(self) -> &'static str {
        match self {
            Index::IgpM => "IGP-M (FGV) - a partir de 06/1989",
            Index::IgpDi => "IGP-DI (FGV) - a partir de 02/1944",
            Index::Inpc => "INPC (IBGE) - a partir de 04/1979",
            Index::Ipca => "IPCA (IBGE) - a partir de 01/1980",
            Index::IpcaE => "IPCA-E (IBGE) - a partir de 01/1992",
            Index::IpcBrasil => "IPC-BRASIL (FGV) - a partir de 01/1990",
            Index::IpcSp => "IPC-SP (FIPE) - a partir de 11/1942",
        }
    }

    pub fn valid_codes() -> String {
        Index::ALL
            .iter()
            .map(|index| index.code())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolves an optional registry code to an index. `None` falls back to
    /// the default; an unknown code fails before any request can be built.
    pub fn validate(code: Option<&str>) -> Result<Index> {
        match code {
            None => Ok(Index::default()),
            Some(code) => Index::ALL
                .iter()
                .copied()
                .find(|index| index.code() == code)
                .ok_or_else(|| AppError::InvalidIndex {
                    code: code.to_string(),
                    valid: Index::valid_codes(),
                }),
        }
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::IgpM
    }
}
