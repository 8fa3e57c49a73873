use crate::Tensor;

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for Tensor<T>
where
    T: serde::Serialize + Clone,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // data is written in row-major order so strides never leak into the format
        let contiguous = self.to_standard_layout();
        let mut state = serializer.serialize_struct("Tensor", 2)?;
        state.serialize_field("data", contiguous.as_slice())?;
        state.serialize_field("shape", &self.shape)?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Tensor<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let TensorData { data, shape } = TensorData::deserialize(deserializer)?;

        Tensor::from_shape_vec(&shape, data).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor;

    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let tensor = Tensor::from_shape_vec(&[2, 3], vec![1u8, 2, 3, 4, 5, 6])?;
        let serialized = serde_json::to_string(&tensor)?;
        let deserialized: Tensor<u8> = serde_json::from_str(&serialized)?;
        assert_eq!(tensor.shape(), deserialized.shape());
        assert_eq!(tensor.as_slice(), deserialized.as_slice());
        Ok(())
    }

    #[test]
    fn test_serde_permuted_is_row_major() -> Result<(), Box<dyn std::error::Error>> {
        let tensor = Tensor::from_shape_vec(&[2, 2], vec![1.0f64, 2.0, 3.0, 4.0])?;
        let transposed = tensor.permute_axes(&[1, 0])?;
        let serialized = serde_json::to_string(&transposed)?;
        let deserialized: Tensor<f64> = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
        Ok(())
    }

    #[test]
    fn test_serde_rejects_bad_shape() {
        let res: Result<Tensor<u8>, _> = serde_json::from_str(r#"{"data":[1,2,3],"shape":[2,2]}"#);
        assert!(res.is_err());
    }
}
